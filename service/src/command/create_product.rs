//! [`Command`] for creating a [`Product`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        product::{self, tier, Draft, PriceTier},
        Product,
    },
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Product`] along with its [`PriceTier`]s.
#[derive(Clone, Debug)]
pub struct CreateProduct {
    /// [`Product`] to create.
    pub product: product::New,

    /// Validated [`PriceTier`]s of the created [`Product`].
    pub tiers: Draft,
}

impl<A> Command<CreateProduct> for Service<A>
where
    A: Api<Insert<product::New>, Ok = Product, Err = Traced<api::Error>>
        + Api<Insert<tier::New>, Ok = PriceTier, Err = Traced<api::Error>>,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateProduct) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProduct { product, tiers } = cmd;

        let mut product = self
            .api()
            .execute(Insert(product))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Tiers are added one by one, from the lowest quantity.
        let mut created = Vec::with_capacity(tiers.len());
        for tier in tiers.into_tiers() {
            let tier = self
                .api()
                .execute(Insert(tier::New {
                    product_id: product.id,
                    tier,
                }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            created.push(tier);
        }
        product.price_tiers = created;

        Ok(product)
    }
}

/// Error of [`CreateProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),
}

#[cfg(all(test, feature = "rest"))]
mod spec {
    use serde_json::{json, Value};
    use wiremock::{
        matchers::{body_json, body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        domain::product::{
            self,
            tier::{Candidate, Period},
            Draft,
        },
        infra::{
            rest::{self, Store},
            Rest,
        },
        Command as _, Service,
    };

    use super::CreateProduct;

    const PRODUCT_ID: &str = "7a0e2c44-1b9f-4c1e-b3f3-6a2f8d5e4c10";
    const TYPE_ID: &str = "c3d4e5f6-a7b8-4c9d-8e0f-112233445566";

    fn tier(id: &str, min: u32, max: Option<u32>, price: &str) -> Value {
        json!({
            "id": id,
            "min_quantity": min,
            "max_quantity": max,
            "price_per_unit": price,
            "period": "month",
        })
    }

    fn candidate(min: u32, max: Option<u32>, price: &str) -> Candidate {
        Candidate {
            min_quantity: Some(min),
            max_quantity: max,
            price_per_unit: Some(price.to_owned()),
            period: Period::Month,
        }
    }

    #[tokio::test]
    async fn creates_product_then_its_tiers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/products"))
            .and(body_json(json!({
                "name": "Cloud Backup",
                "type_id": TYPE_ID,
                "unit": "TB",
                "is_active": true,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": PRODUCT_ID,
                "name": "Cloud Backup",
                "type_id": TYPE_ID,
                "unit": "TB",
                "description": null,
                "is_active": true,
                "price_tiers": [],
                "created_at": "2025-01-01T10:00:00",
                "updated_at": "2025-01-01T10:00:00",
            })))
            .expect(1)
            .mount(&server)
            .await;
        for (id, min, max, price) in [
            ("00000000-0000-4000-8000-000000000001", 1, Some(9), "10.00"),
            ("00000000-0000-4000-8000-000000000002", 10, None, "8.50"),
        ] {
            Mock::given(method("POST"))
                .and(path(format!("/api/v1/products/{PRODUCT_ID}/price-tiers")))
                .and(body_partial_json(json!({ "min_quantity": min })))
                .respond_with(
                    ResponseTemplate::new(201)
                        .set_body_json(tier(id, min, max, price)),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let mut tiers = Draft::new();
        _ = tiers.add(&candidate(10, None, "8.50")).unwrap();
        _ = tiers.add(&candidate(1, Some(9), "10.00")).unwrap();

        let conf = rest::Config {
            base_url: server.uri(),
            ..rest::Config::default()
        };
        let svc = Service::new(Rest::new(&conf, Store::in_memory()).unwrap());
        let created = svc
            .execute(CreateProduct {
                product: product::New {
                    name: product::Name::new("Cloud Backup").unwrap(),
                    type_id: TYPE_ID.parse().unwrap(),
                    unit: product::Unit::new("TB").unwrap(),
                    description: None,
                    is_active: true,
                },
                tiers,
            })
            .await
            .unwrap();

        let mins = created
            .price_tiers
            .iter()
            .map(|t| t.min_quantity)
            .collect::<Vec<_>>();
        assert_eq!(mins, [1, 10]);
        assert!(created.price_tiers.iter().all(|t| t.id.is_some()));
    }
}
