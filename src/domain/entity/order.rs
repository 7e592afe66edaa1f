use std::str::FromStr;

use derive_more::Display;
use uuid::Uuid;

use crate::base::ResourceID;
use crate::error::operation::OperationError;
use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

use super::{impl_entity, state_copy, state_ref, EntityData};

/// Delivery order lifecycle.
///
/// The happy path runs top to bottom; `InTroubles` is reachable from any
/// active status once the order is on the road, and `Cancelled` only before
/// pickup started.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    #[display(fmt = "PENDING")]
    Pending,
    #[display(fmt = "PROCESSING")]
    Processing,
    #[display(fmt = "CONTRACT_SIGNED")]
    ContractSigned,
    #[display(fmt = "ASSIGNED_TO_DRIVER")]
    AssignedToDriver,
    #[display(fmt = "PICKING_UP")]
    PickingUp,
    #[display(fmt = "ON_DELIVERY")]
    OnDelivery,
    #[display(fmt = "DELIVERED")]
    Delivered,
    #[display(fmt = "COMPLETED")]
    Completed,
    #[display(fmt = "IN_TROUBLES")]
    InTroubles,
    #[display(fmt = "RETURNING")]
    Returning,
    #[display(fmt = "RETURNED")]
    Returned,
    #[display(fmt = "CANCELLED")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::ContractSigned => "CONTRACT_SIGNED",
            OrderStatus::AssignedToDriver => "ASSIGNED_TO_DRIVER",
            OrderStatus::PickingUp => "PICKING_UP",
            OrderStatus::OnDelivery => "ON_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::InTroubles => "IN_TROUBLES",
            OrderStatus::Returning => "RETURNING",
            OrderStatus::Returned => "RETURNED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Returned | OrderStatus::Cancelled
        )
    }

    fn next_in_flow(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::ContractSigned),
            OrderStatus::ContractSigned => Some(OrderStatus::AssignedToDriver),
            OrderStatus::AssignedToDriver => Some(OrderStatus::PickingUp),
            OrderStatus::PickingUp => Some(OrderStatus::OnDelivery),
            OrderStatus::OnDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// Whether pickup has started, i.e. the cargo left the sender.
    fn on_the_road(&self) -> bool {
        matches!(
            self,
            OrderStatus::PickingUp | OrderStatus::OnDelivery | OrderStatus::InTroubles
        )
    }

    pub fn can_transition(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if self.next_in_flow() == Some(to) {
            return true;
        }
        match to {
            // Cancellation is only allowed while the cargo is still with the sender.
            OrderStatus::Cancelled => !self.on_the_road() && *self != OrderStatus::Delivered,
            OrderStatus::InTroubles => self.on_the_road() || *self == OrderStatus::Delivered,
            OrderStatus::Returning => *self == OrderStatus::InTroubles,
            OrderStatus::Returned => *self == OrderStatus::Returning,
            // Trouble resolution resumes the delivery flow.
            OrderStatus::OnDelivery => *self == OrderStatus::InTroubles,
            _ => false,
        }
    }
}

impl ResourceID for OrderStatus {
    fn resource_id() -> &'static str {
        "order::status"
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PROCESSING" => Ok(Self::Processing),
            "CONTRACT_SIGNED" => Ok(Self::ContractSigned),
            "ASSIGNED_TO_DRIVER" => Ok(Self::AssignedToDriver),
            "PICKING_UP" => Ok(Self::PickingUp),
            "ON_DELIVERY" => Ok(Self::OnDelivery),
            "DELIVERED" => Ok(Self::Delivered),
            "COMPLETED" => Ok(Self::Completed),
            "IN_TROUBLES" => Ok(Self::InTroubles),
            "RETURNING" => Ok(Self::Returning),
            "RETURNED" => Ok(Self::Returned),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ValidationFieldError::from_resource::<Self>(
                s.into(),
                String::new(),
                vec![ValidationErrorKind::UnknownVariant],
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderState {
    pub(in crate::domain) code: String,
    pub(in crate::domain) receiver_name: String,
    pub(in crate::domain) receiver_phone: Option<String>,
    pub(in crate::domain) package_description: Option<String>,
    pub(in crate::domain) total_quantity: i32,
    pub(in crate::domain) pickup_address: String,
    pub(in crate::domain) delivery_address: String,
    pub(in crate::domain) sender_id: Uuid,
    pub(in crate::domain) status: OrderStatus,
    pub(in crate::domain) quoted_price: i64,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: OrderState,
}

impl_entity!(Order, OrderState);

impl Order {
    state_ref!(code, String);
    state_ref!(receiver_name, String);
    state_ref!(receiver_phone, Option<String>);
    state_ref!(package_description, Option<String>);
    state_copy!(total_quantity, i32);
    state_ref!(pickup_address, String);
    state_ref!(delivery_address, String);
    state_copy!(sender_id, Uuid);
    state_copy!(status, OrderStatus);
    state_copy!(quoted_price, i64);

    #[allow(clippy::too_many_arguments)]
    pub fn place(
        code: String,
        receiver_name: String,
        receiver_phone: Option<String>,
        package_description: Option<String>,
        total_quantity: i32,
        pickup_address: String,
        delivery_address: String,
        sender_id: Uuid,
        quoted_price: i64,
    ) -> Self {
        Self {
            data: EntityData::new(),
            state: OrderState {
                code,
                receiver_name,
                receiver_phone,
                package_description,
                total_quantity,
                pickup_address,
                delivery_address,
                sender_id,
                status: OrderStatus::Pending,
                quoted_price,
            },
        }
    }

    pub fn transition(&mut self, to: OrderStatus) -> Result<(), OperationError> {
        let from = self.state.status;
        if from.is_terminal() {
            return Err(OperationError::TerminalStatus(from.as_str()));
        }
        if !from.can_transition(to) {
            return Err(OperationError::InvalidTransition {
                from: from.as_str(),
                to: to.as_str(),
            });
        }
        self.state.status = to;
        self.data.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn order() -> Order {
        Order::place(
            "ORD-7F3A21C0".into(),
            "Ngoc Hoang".into(),
            Some("+84912345678".into()),
            Some("pallets of ceramic tiles".into()),
            12,
            "12 Nguyen Hue, District 1, HCMC".into(),
            "88 Le Loi, Da Nang".into(),
            Uuid::new_v4(),
            3_250_000,
        )
    }

    #[test]
    fn happy_path_runs_to_completed() {
        let mut order = order();
        let flow = [
            OrderStatus::Processing,
            OrderStatus::ContractSigned,
            OrderStatus::AssignedToDriver,
            OrderStatus::PickingUp,
            OrderStatus::OnDelivery,
            OrderStatus::Delivered,
            OrderStatus::Completed,
        ];
        for status in flow {
            order.transition(status).unwrap();
            assert_eq!(order.status(), status);
        }
        assert!(order.status().is_terminal());
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let mut order = order();
        let err = order.transition(OrderStatus::OnDelivery).unwrap_err();
        assert_eq!(
            err,
            OperationError::InvalidTransition {
                from: "PENDING",
                to: "ON_DELIVERY"
            }
        );
    }

    #[test]
    fn cancel_is_allowed_before_pickup_only() {
        let mut order = order();
        order.transition(OrderStatus::Processing).unwrap();
        assert!(order.status().can_transition(OrderStatus::Cancelled));

        order.transition(OrderStatus::ContractSigned).unwrap();
        order.transition(OrderStatus::AssignedToDriver).unwrap();
        order.transition(OrderStatus::PickingUp).unwrap();
        let err = order.transition(OrderStatus::Cancelled).unwrap_err();
        assert_eq!(
            err,
            OperationError::InvalidTransition {
                from: "PICKING_UP",
                to: "CANCELLED"
            }
        );
    }

    #[test]
    fn troubled_order_can_return_or_resume() {
        let mut order = order();
        for status in [
            OrderStatus::Processing,
            OrderStatus::ContractSigned,
            OrderStatus::AssignedToDriver,
            OrderStatus::PickingUp,
            OrderStatus::OnDelivery,
            OrderStatus::InTroubles,
        ] {
            order.transition(status).unwrap();
        }

        assert!(order.status().can_transition(OrderStatus::OnDelivery));
        order.transition(OrderStatus::Returning).unwrap();
        order.transition(OrderStatus::Returned).unwrap();

        let err = order.transition(OrderStatus::Processing).unwrap_err();
        assert_eq!(err, OperationError::TerminalStatus("RETURNED"));
    }
}
