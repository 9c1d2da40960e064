//! [`Command`] for activating an [`Order`] into a [`Contract`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, Activate, Activation},
        order, Contract, Order,
    },
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for activating a fulfilled [`Order`] into a [`Contract`].
#[derive(Clone, Debug)]
pub struct ActivateOrder {
    /// ID of the [`Order`] to activate.
    pub order_id: order::Id,

    /// [`Activation`] dates of the created [`Contract`].
    pub activation: Activation,
}

impl<A> Command<ActivateOrder> for Service<A>
where
    A: Api<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<api::Error>,
        > + Api<Insert<Activate>, Ok = Contract, Err = Traced<api::Error>>,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ActivateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ActivateOrder {
            order_id,
            activation,
        } = cmd;

        let order = self
            .api()
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        if !order.can_activate() {
            return Err(tracerr::new!(E::OrderNotFulfilled {
                id: order.id,
                status: order.status,
            }));
        }

        activation
            .check(DateTime::now())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.api()
            .execute(Insert(Activate {
                order_id: order.id,
                activation,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ActivateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// [`Activation`] dates are inconsistent.
    #[display("Invalid `Contract` dates: {_0}")]
    InvalidActivation(contract::InvalidActivation),

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),

    /// [`Order`] is not fulfilled yet.
    #[display("`Order(id: {id})` is `{status}`, but must be `fulfilled`")]
    #[from(ignore)]
    OrderNotFulfilled {
        /// ID of the [`Order`].
        id: order::Id,

        /// Current [`order::Status`] of the [`Order`].
        status: order::Status,
    },
}

#[cfg(all(test, feature = "rest"))]
mod spec {
    use common::DateTime;
    use serde_json::{json, Value};
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        domain::{contract::Activation, order},
        infra::{
            rest::{self, Store},
            Rest,
        },
        Command as _, Service,
    };

    use super::{ActivateOrder, ExecutionError};

    const ORDER_ID: &str = "0b7c3f0e-8d4a-4f5e-9a51-2f1b6c1e9d01";

    fn order(status: &str) -> Value {
        json!({
            "id": ORDER_ID,
            "order_number": "ORD-2025-0001",
            "status": status,
            "subtotal": "1200.00",
            "discount_amount": "0.00",
            "tax_amount": "0.00",
            "total_amount": "1200.00",
            "created_at": "2025-01-01T10:00:00",
            "updated_at": "2025-01-02T10:00:00",
        })
    }

    async fn service(server: &MockServer, status: &str) -> Service<Rest> {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/orders/{ORDER_ID}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(order(status)),
            )
            .mount(server)
            .await;

        let conf = rest::Config {
            base_url: server.uri(),
            ..rest::Config::default()
        };
        Service::new(Rest::new(&conf, Store::in_memory()).unwrap())
    }

    fn cmd(activation: Activation) -> ActivateOrder {
        ActivateOrder {
            order_id: ORDER_ID.parse().unwrap(),
            activation,
        }
    }

    #[tokio::test]
    async fn activates_fulfilled_order() {
        let server = MockServer::start().await;
        let svc = service(&server, "fulfilled").await;
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/orders/{ORDER_ID}/activate")))
            .and(body_partial_json(json!({ "notes_internal": "signed" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "5d1f7a8e-3c2b-4e6f-8a9d-0b1c2d3e4f50",
                "contract_number": "CTR-2025-0001",
                "order_id": ORDER_ID,
                "status": "active",
                "activation_date": "2025-02-01T00:00:00",
                "expiration_date": "2026-02-01T00:00:00",
                "total_value": "1200.00",
                "created_at": "2025-02-01T00:00:00",
                "updated_at": "2025-02-01T00:00:00",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let contract = svc
            .execute(cmd(Activation {
                notes_internal: Some("signed".to_owned()),
                ..Activation::default()
            }))
            .await
            .unwrap();
        assert_eq!(contract.contract_number, "CTR-2025-0001");
        assert!(contract.can_renew());
    }

    #[tokio::test]
    async fn rejects_unfulfilled_order() {
        let server = MockServer::start().await;
        let svc = service(&server, "in_fulfillment").await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let err = svc.execute(cmd(Activation::default())).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::OrderNotFulfilled {
                status: order::Status::InFulfillment,
                ..
            },
        ));
    }

    #[tokio::test]
    async fn rejects_expiration_in_the_past() {
        let server = MockServer::start().await;
        let svc = service(&server, "fulfilled").await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let expired = DateTime::parse("2020-01-01T00:00:00").unwrap().coerce();
        let err = svc
            .execute(cmd(Activation {
                expiration_date: Some(expired),
                ..Activation::default()
            }))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::InvalidActivation(_),
        ));
    }

    #[tokio::test]
    async fn reports_missing_order() {
        let server = MockServer::start().await;
        let conf = rest::Config {
            base_url: server.uri(),
            ..rest::Config::default()
        };
        let svc = Service::new(Rest::new(&conf, Store::in_memory()).unwrap());

        let err = svc.execute(cmd(Activation::default())).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::OrderNotExists(_)));
    }
}
