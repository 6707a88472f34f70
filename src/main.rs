#[tokio::main]
async fn main() {
    if let Err(e) = magtinum_lib::run().await {
        log::error!("启动失败: {}", e);
        eprintln!("启动失败: {}", e);
        std::process::exit(1);
    }
}
