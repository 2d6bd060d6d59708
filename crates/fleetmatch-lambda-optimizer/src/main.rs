#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    fleetmatch_lambda_optimizer::run().await
}
