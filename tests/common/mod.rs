use actix_web::{web, App};
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;
use std::time::Duration;

use guesthouse_api::routes;
use guesthouse_api::services::payment::razorpay::RazorpayGateway;

pub const ADMIN_SECRET: &str = "guesthouseadmin";

pub struct TestApp {
    pub client: Arc<Client>,
    pub gateway: RazorpayGateway,
}

impl TestApp {
    /// App wired like `main.rs` but against collaborators that are down:
    /// the Mongo client points at an unroutable port with short timeouts
    /// (it only connects lazily, when a handler touches the store), and the
    /// gateway points at a closed port so `collect` fails immediately with
    /// a transport error. Handlers that never reach either run for real.
    pub async fn new() -> Self {
        let mut options = ClientOptions::parse("mongodb://127.0.0.1:1")
            .await
            .expect("test mongo uri should parse");
        options.connect_timeout = Some(Duration::from_millis(300));
        options.server_selection_timeout = Some(Duration::from_millis(300));
        let client =
            Arc::new(Client::with_options(options).expect("test mongo client should build"));

        let gateway =
            RazorpayGateway::new("rzp_test_key", "rzp_test_secret").with_api_base("http://127.0.0.1:9");

        Self { client, gateway }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .app_data(web::Data::new(self.gateway.clone()))
            .service(
                web::scope("/api")
                    .route("/rooms", web::get().to(routes::rooms::get_rooms))
                    .service(
                        web::scope("/bookings")
                            .route("", web::post().to(routes::bookings::submit_booking))
                            .route("/quote", web::post().to(routes::bookings::quote)),
                    )
                    .configure(routes::admin::config),
            )
    }
}
