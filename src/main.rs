mod config;
mod context;
mod dataset;
mod error;
mod logging;
mod lookup;
mod matching;
mod protocol;
mod server;

use std::sync::Arc;

use anyhow::Context;

use crate::config::Settings;
use crate::context::AppContext;
use crate::protocol::ResolveReport;

fn main() {
    if let Err(e) = real_main() {
        // Keep stderr noisy for operators; logs may also go to file.
        eprintln!("[cook_api] fatal error: {e:?}");
        log::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let _logger = logging::init_logging(settings.log_dir.as_deref())?;

    log::info!("Dataset path: {}", settings.db_path.display());
    log::info!("Mode policy: {}", settings.mode_policy.as_str());

    // Fail fast: nothing is served without a complete dataset.
    let ctx = AppContext::load(&settings)?;

    let args: Vec<String> = std::env::args().collect();

    // One-shot modes used by deploy checks and for debugging matches from a shell.
    if args.iter().any(|a| a == "--check") {
        let summary = serde_json::json!({
            "ok": true,
            "foods": ctx.dataset.len(),
            "dataset_sha256": ctx.dataset.fingerprint(),
        });
        println!("{summary}");
        return Ok(());
    }
    if args.iter().any(|a| a == "--resolve") {
        let query = read_arg_value(&args, "--resolve").context("missing query after --resolve")?;
        let report = ResolveReport::build(&ctx, &query, true);
        println!("{}", serde_json::to_string(&report).context("failed serializing resolve report")?);
        return Ok(());
    }

    log::info!("=== Cooking manual API started ===");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(server::serve(Arc::new(ctx), settings.bind_addr))?;

    log::info!("=== Cooking manual API stopped ===");
    Ok(())
}

fn read_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
