use crate::configuration::Settings;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pool: SqlitePool,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let allowed_origins = settings.allowed_origins.clone();
    let settings = web::Data::new(settings);
    let pool = web::Data::new(pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        let cors = if allowed_origins == "*" {
            Cors::permissive()
        } else {
            allowed_origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
        };

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .service(routes::health_check)
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/builds")
                            .service(routes::build::our)
                            .service(routes::build::item),
                    )
                    .service(
                        web::scope("/compare")
                            .service(routes::compare::by_price)
                            .service(routes::compare::by_specs),
                    )
                    .service(web::scope("/parse").service(routes::parse::start))
                    .service(routes::search::search)
                    .service(routes::stats::stats),
            )
            .app_data(json_config.clone())
            .app_data(pool.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
