//! In-process blog service for end-to-end client tests.

use std::net::SocketAddr;

use actix_web::HttpServer;
use blog_backend::test_support::{api_test_app, in_memory_state};

/// Password used by every test account.
pub const PASSWORD: &str = "correct horse battery";

/// Start the API over a fresh in-memory store on an ephemeral port.
///
/// The server runs on the current actix system until the test ends.
pub fn spawn_backend() -> String {
    let state = in_memory_state();
    let server = HttpServer::new(move || api_test_app(state.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind ephemeral port");
    let addr: SocketAddr = *server.addrs().first().expect("bound address");
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}
