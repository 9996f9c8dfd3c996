use super::types::{
    request,
    response::{self, History},
};
use crate::{modules::order::repository::WaterOrder, types::Context};
use chrono::{DateTime, Duration, TimeZone};
use std::sync::Arc;

/// `created_at` is naive UTC. "Today" is the calendar day of `now` in its own
/// time zone, the same local day deliveries are keyed on.
fn group<Tz: TimeZone>(orders: Vec<WaterOrder>, now: DateTime<Tz>) -> History {
    let zone = now.timezone();
    let today = now.date_naive();
    let now = now.naive_utc();
    let mut history = History::default();

    for order in orders {
        if zone.from_utc_datetime(&order.created_at).date_naive() == today {
            history.daily.push(order.clone());
        }
        if order.created_at >= now - Duration::days(7) {
            history.weekly.push(order.clone());
        }
        if order.created_at >= now - Duration::days(30) {
            history.monthly.push(order);
        }
    }

    history
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload
        .user_id
        .trim()
        .parse::<i32>()
        .map_err(|_| response::Error::InvalidUserId)?;

    let orders = ctx
        .db
        .water_orders
        .find_many_by_user_id(user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchOrders)?;

    Ok(response::Success::History(group(orders, ctx.clock.local())))
}
