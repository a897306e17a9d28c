use std::process;

use log::error;

use url_alias::{app, errors::AppError};

#[actix_web::main]
async fn main() {
    if let Err(err) = app::server().await {
        let code = match err {
            AppError::Server(ref e) => {
                error!("Critical server error: {}", e);
                1
            }
            AppError::Config(ref e) => {
                // The logger is not up yet when configuration fails
                eprintln!("Critical configuration error: {}", e);
                2
            }
            AppError::Logger(ref e) => {
                eprintln!("Critical logger error: {}", e);
                3
            }
            AppError::Database(ref e) => {
                error!("Critical database error: {}", e);
                4
            }
            _ => {
                error!("Unexpected error: {}", err);
                1
            }
        };
        process::exit(code);
    }
}
