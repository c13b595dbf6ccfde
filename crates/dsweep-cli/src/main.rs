#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = dsweep_cli::run().await;
    std::process::exit(code);
}
