//! [`Api`] operations performed by a [`Rest`] client.

use common::operations::{By, Delete, Insert, Perform, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, invoice::Invoices},
        distributor::{self, Assignment},
        product::{duration, Duration},
        user::{session::Grant, Session},
        Contract, Distributor,
    },
    infra::api::{
        self, Api, Create, ListResponse, Login, Logout, Patch, Patched,
        Resource,
    },
    read::list::{Page, Selector},
};

use super::{Call, Rest};

impl<R: Resource> Api<Select<By<Option<R>, R::Id>>> for Rest {
    type Ok = Option<R>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<R>, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self.client.get(self.url(&format!("{}/{id}", R::PATH)));

        match self.send(req, Call::Regular).await {
            Ok(resp) => Self::json(resp).await.map(Some),
            Err(e) if e.as_ref().is_not_found() => Ok(None),
            Err(e) => Err(tracerr::wrap!()(e)),
        }
    }
}

impl<R: Resource> Api<Select<By<Page<R>, Selector<R::Filter>>>> for Rest {
    type Ok = Page<R>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<R>, Selector<R::Filter>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector { arguments, filter } = by.into_inner();
        let req = self
            .client
            .get(self.url(R::PATH))
            .query(&arguments)
            .query(&filter);

        let resp = self
            .send(req, Call::Regular)
            .await
            .map_err(tracerr::wrap!())?;
        let body = Self::body(resp).await.map_err(tracerr::wrap!())?;
        ListResponse::decode(&body)
            .map(ListResponse::into_page)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }
}

impl Api<Select<By<Vec<Duration>, ()>>> for Rest {
    type Ok = Vec<Duration>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Duration>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.client.get(self.url(duration::PATH));

        let resp = self
            .send(req, Call::Regular)
            .await
            .map_err(tracerr::wrap!())?;
        let body = Self::body(resp).await.map_err(tracerr::wrap!())?;
        ListResponse::decode(&body)
            .map(ListResponse::into_items)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }
}

impl Api<Select<By<Vec<Assignment>, distributor::Id>>> for Rest {
    type Ok = Vec<Assignment>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Assignment>, distributor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self
            .client
            .get(self.url(&format!("{}/{id}/partners", Distributor::PATH)));

        let resp = self
            .send(req, Call::Regular)
            .await
            .map_err(tracerr::wrap!())?;
        let body = Self::body(resp).await.map_err(tracerr::wrap!())?;
        ListResponse::decode(&body)
            .map(ListResponse::into_items)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }
}

impl Api<Select<By<Invoices, contract::Id>>> for Rest {
    type Ok = Invoices;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Invoices, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self
            .client
            .get(self.url(&format!("{}/{id}/invoices", Contract::PATH)));

        let resp = self
            .send(req, Call::Regular)
            .await
            .map_err(tracerr::wrap!())?;
        Self::json(resp).await.map_err(tracerr::wrap!())
    }
}

impl<C: Create> Api<Insert<C>> for Rest {
    type Ok = C::Resource;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(body): Insert<C>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.client.post(self.url(&body.path())).json(&body);

        let resp = self
            .send(req, Call::Regular)
            .await
            .map_err(tracerr::wrap!())?;
        Self::json(resp).await.map_err(tracerr::wrap!())
    }
}

impl<P: Patch> Api<Update<Patched<P>>> for Rest {
    type Ok = P::Resource;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Update(patched): Update<Patched<P>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Patched { id, patch } = patched;
        let req = self.client.put(self.url(&P::path(&id))).json(&patch);

        let resp = self
            .send(req, Call::Regular)
            .await
            .map_err(tracerr::wrap!())?;
        Self::json(resp).await.map_err(tracerr::wrap!())
    }
}

impl<R: Resource> Api<Delete<By<R, R::Id>>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<R, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self.client.delete(self.url(&format!("{}/{id}", R::PATH)));

        self.send(req, Call::Regular)
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

impl Api<Perform<Login>> for Rest {
    type Ok = Grant;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(Login(credentials)): Perform<Login>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.client.post(self.url("/auth/login")).json(&credentials);

        let resp = self
            .send(req, Call::Login)
            .await
            .map_err(tracerr::wrap!())?;
        let grant: Grant = Self::json(resp).await.map_err(tracerr::wrap!())?;

        self.session
            .authenticate(Session::from(grant.clone()))
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;
        Ok(grant)
    }
}

impl Api<Perform<Logout>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(&self, _: Perform<Logout>) -> Result<Self::Ok, Self::Err> {
        self.session
            .clear()
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Perform, Select};
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
    };
    use wiremock::{
        matchers::{body_json, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        domain::{
            contract::invoice::Invoices,
            distributor::Assignment,
            user::{
                session::{Kind, Token},
                Credentials, Password, Session, Username,
            },
        },
        infra::api::{self, Api as _, Login, Resource},
        read::list::{Page, Selector},
    };

    use super::super::{session::State, Config, Rest, Store};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    #[derive(Debug, Default, Serialize)]
    struct Filter {
        #[serde(skip_serializing_if = "Option::is_none")]
        search: Option<String>,
    }

    impl Resource for Item {
        type Id = u32;
        type Filter = Filter;

        const PATH: &'static str = "/items";
    }

    async fn rest(server: &MockServer) -> Rest {
        Rest::new(
            &Config {
                base_url: server.uri(),
                ..Config::default()
            },
            Store::in_memory(),
        )
        .unwrap()
    }

    async fn list(rest: &Rest) -> Page<Item> {
        rest.execute(Select(By::<Page<Item>, _>::new(Selector::default())))
            .await
            .unwrap()
    }

    fn credentials() -> Credentials {
        Credentials::new(
            Username::new("admin").unwrap(),
            Password::new("secret").unwrap(),
        )
    }

    #[tokio::test]
    async fn normalizes_list_shapes() {
        for (body, expected) in [
            (
                json!({
                    "items": [{ "id": 1 }, { "id": 2 }],
                    "pagination": {
                        "page": 1,
                        "page_size": 50,
                        "total_items": 2,
                        "total_pages": 1,
                        "has_next": false,
                        "has_prev": false,
                    },
                }),
                vec![1, 2],
            ),
            (json!([{ "id": 1 }, { "id": 2 }]), vec![1, 2]),
            (json!({}), vec![]),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/v1/items"))
                .respond_with(ResponseTemplate::new(200).set_body_json(&body))
                .expect(1)
                .mount(&server)
                .await;

            let page = list(&rest(&server).await).await;
            let ids = page.items.iter().map(|i| i.id).collect::<Vec<_>>();
            assert_eq!(ids, expected, "body: {body}");
        }
    }

    #[tokio::test]
    async fn sends_pagination_and_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/items"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "10"))
            .and(query_param("search", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let selector = Selector {
            arguments: common::pagination::Arguments::new(2, 10).unwrap(),
            filter: Filter {
                search: Some("acme".to_owned()),
            },
        };
        let page = rest(&server)
            .await
            .execute(Select(By::<Page<Item>, _>::new(selector)))
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn maps_missing_resource_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/items/7"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "detail": "Item not found" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/items/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })),
            )
            .mount(&server)
            .await;

        let rest = rest(&server).await;
        let missing = rest
            .execute(Select(By::<Option<Item>, _>::new(7)))
            .await
            .unwrap();
        assert_eq!(missing, None);

        let found = rest
            .execute(Select(By::<Option<Item>, _>::new(1)))
            .await
            .unwrap();
        assert_eq!(found, Some(Item { id: 1 }));
    }

    #[tokio::test]
    async fn surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/items/3"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "detail": "Item is in use" })),
            )
            .mount(&server)
            .await;

        let err = rest(&server)
            .await
            .execute(Delete(By::<Item, _>::new(3)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            api::Error::Status { status: 409, message: Some(m) }
                if m == "Item is in use",
        ));
    }

    #[tokio::test]
    async fn logs_in_and_attaches_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .and(body_json(json!({
                "username": "admin",
                "password": "secret",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tkn",
                "token_type": "bearer",
                "expires_in": 1800,
                "user_type": "admin",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/items"))
            .and(header("authorization", "Bearer tkn"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let rest = rest(&server).await;
        let grant = rest.execute(Perform(Login(credentials()))).await.unwrap();
        assert_eq!(grant.user_type, Kind::Admin);
        assert!(matches!(rest.session().state(), State::Authenticated(_)));

        assert!(list(&rest).await.items.is_empty());
    }

    #[tokio::test]
    async fn invalidates_session_on_unauthorized_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/items"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "detail": "Token expired" })),
            )
            .mount(&server)
            .await;

        let rest = rest(&server).await;
        rest.session()
            .authenticate(Session::new(Token::new("stale").unwrap(), None))
            .unwrap();
        let mut rx = rest.session().subscribe();

        let err = rest
            .execute(Select(By::<Page<Item>, _>::new(Selector::default())))
            .await
            .unwrap_err();

        assert_eq!(err.as_ref().message(), Some("Token expired"));
        assert!(matches!(err.as_ref(), api::Error::Unauthorized { .. }));
        assert!(rx.has_changed().unwrap());
        assert!(matches!(*rx.borrow_and_update(), State::Invalidated));
        assert!(rest.session().session().is_none());
    }

    #[tokio::test]
    async fn invalidates_session_on_truncated_unauthorized_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0; 4096];
            _ = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 401 Unauthorized\r\n\
                      content-type: application/json\r\n\
                      content-length: 100\r\n\r\n\
                      {\"detail\"",
                )
                .await
                .unwrap();
        });

        let rest = Rest::new(
            &Config {
                base_url: format!("http://{addr}"),
                ..Config::default()
            },
            Store::in_memory(),
        )
        .unwrap();
        rest.session()
            .authenticate(Session::new(Token::new("stale").unwrap(), None))
            .unwrap();
        let mut rx = rest.session().subscribe();

        let err = rest
            .execute(Select(By::<Option<Item>, _>::new(7)))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err.as_ref(),
            api::Error::Unauthorized { message: None },
        ));
        assert!(rx.has_changed().unwrap());
        assert!(matches!(*rx.borrow_and_update(), State::Invalidated));
        assert!(rest.session().session().is_none());
    }

    #[tokio::test]
    async fn keeps_session_on_unauthorized_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let rest = rest(&server).await;
        rest.session()
            .authenticate(Session::new(Token::new("current").unwrap(), None))
            .unwrap();
        let mut rx = rest.session().subscribe();

        let err = rest
            .execute(Perform(Login(credentials())))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), api::Error::Unauthorized { .. }));
        assert!(!rx.has_changed().unwrap());
        assert!(matches!(*rx.borrow_and_update(), State::Authenticated(_)));
    }

    #[tokio::test]
    async fn lists_distributor_partners() {
        const DISTRIBUTOR_ID: &str = "3e4f5a6b-7c8d-4e9f-8a0b-1c2d3e4f5a6b";

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!(
                "/api/v1/distributors/{DISTRIBUTOR_ID}/partners",
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "6f7a8b9c-0d1e-4f2a-8b3c-4d5e6f7a8b9c",
                "distributor_id": DISTRIBUTOR_ID,
                "partner_id": "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d",
                "partner": {
                    "id": "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d",
                    "name": "Acme",
                    "created_at": "2025-01-10T09:00:00",
                    "updated_at": "2025-01-10T09:00:00",
                },
                "assigned_at": "2025-01-11T09:00:00",
                "is_active": true,
                "notes": null,
                "created_at": "2025-01-11T09:00:00",
                "updated_at": "2025-01-11T09:00:00",
            }])))
            .mount(&server)
            .await;

        let assignments = rest(&server)
            .await
            .execute(Select(By::<Vec<Assignment>, _>::new(
                DISTRIBUTOR_ID.parse().unwrap(),
            )))
            .await
            .unwrap();

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].partner.name, "Acme");
        assert!(assignments[0].is_active);
    }

    #[tokio::test]
    async fn reports_invoices_of_missing_contract() {
        const CONTRACT_ID: &str = "5d1f7a8e-3c2b-4e6f-8a9d-0b1c2d3e4f50";

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/contracts/{CONTRACT_ID}/invoices")))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "detail": "Contract not found" })),
            )
            .mount(&server)
            .await;

        let err = rest(&server)
            .await
            .execute(Select(By::<Invoices, _>::new(
                CONTRACT_ID.parse().unwrap(),
            )))
            .await
            .unwrap_err();

        assert!(err.as_ref().is_not_found());
        assert_eq!(err.as_ref().message(), Some("Contract not found"));
    }
}
