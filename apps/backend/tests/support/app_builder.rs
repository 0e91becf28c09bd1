/// Build an actix test service with the production middleware and routes.
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(backend::middleware::TraceSpan)
                .wrap(backend::middleware::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(backend::routes::configure),
        )
        .await
    };
}
