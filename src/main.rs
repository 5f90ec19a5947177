use astra::Server;
use property_notes::db::{init_db, Database};
use property_notes::responses::html_error_response;
use property_notes::router::{handle, App};
use property_notes::{AppConfig, CommentNotes, Host};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,property_notes=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.server.database_path.clone());
    if let Err(e) = init_db(&db) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let mut host = Host::new(db);
    CommentNotes::new(config.notes.clone()).register(&mut host);

    let addr = config.server.bind_addr;
    let server = Server::bind(&addr).max_workers(config.server.max_workers);
    let app = App { host, config };

    info!(%addr, "starting admin server");

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}
