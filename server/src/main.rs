//! Gallery Server Binary

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    gallery_server::start_server().await
}
