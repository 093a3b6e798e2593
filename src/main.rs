mod core;
mod kernel;
mod net;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let krn = kernel::boot().await?;
    krn.setup_http_adapter().run().await?;
    Ok(())
}
