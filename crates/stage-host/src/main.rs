use std::fs;

use anyhow::Context;
use stage_engine::StageConfig;
use stage_host::demo::TitleScene;
use stage_host::{init_logging, LoggingConfig, StageRunner};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 60;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            StageConfig::from_json(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => StageConfig::default(),
    };
    log::info!("stage config: {config:?}");

    let mut runner = StageRunner::new(config);
    runner
        .stage_mut()
        .goto(TitleScene::new())
        .context("loading title scene")?;

    let frames = runner.run(FRAME_DT, MAX_FRAMES)?;
    log::info!(
        "demo finished after {frames} frames; last frame drew {} sprites in {} batches",
        runner.render_buffer().instance_count(),
        runner.render_buffer().batch_count()
    );

    runner.stage_mut().shutdown();
    Ok(())
}
