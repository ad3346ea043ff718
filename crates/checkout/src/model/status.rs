use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Order lifecycle states.
///
/// Allowed transitions:
/// - `Confirmed` -> `Shipping` | `Cancelled`
/// - `Shipping`  -> `Delivered` | `Cancelled`
/// - `Delivered` and `Cancelled` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Confirmed, OrderStatus::Shipping)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
                | (OrderStatus::Shipping, OrderStatus::Delivered)
                | (OrderStatus::Shipping, OrderStatus::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipping" => Ok(OrderStatus::Shipping),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_can_ship_or_cancel() {
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipping));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn shipping_can_deliver_or_cancel() {
        assert!(OrderStatus::Shipping.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::Shipping.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipping.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Shipping.can_transition_to(OrderStatus::Shipping));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Confirmed,
                OrderStatus::Shipping,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn non_terminal_states() {
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(!OrderStatus::Shipping.is_terminal());
    }

    #[test]
    fn parses_known_labels() {
        assert_eq!(
            "confirmed".parse::<OrderStatus>(),
            Ok(OrderStatus::Confirmed)
        );
        assert_eq!("shipping".parse::<OrderStatus>(), Ok(OrderStatus::Shipping));
        assert_eq!(
            "delivered".parse::<OrderStatus>(),
            Ok(OrderStatus::Delivered)
        );
        assert_eq!(
            "cancelled".parse::<OrderStatus>(),
            Ok(OrderStatus::Cancelled)
        );
    }

    #[test]
    fn rejects_unknown_labels() {
        assert!("refunded".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
        assert!("Confirmed".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Shipping,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<OrderStatus>(), Ok(status));
        }
    }
}
