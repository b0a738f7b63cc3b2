use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    entraide::run().await
}
