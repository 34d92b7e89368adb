use aforo::app::{AforoApp, AppError};
use clap::Parser;

fn main() -> Result<(), AppError> {
    env_logger::init();
    log::debug!("cwd: {:?}", std::env::current_dir());
    let args = AforoApp::parse();
    args.op.run()
}
