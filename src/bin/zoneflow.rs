/// 区域进出计数 (Zone Flow Counter)
///
/// 读取外部跟踪器的逐帧输出,统计进入/离开监控区域的人数
///
/// 系统架构:
/// 1. 读取线程: 跟踪结果读取 (独立工作线程)
/// 2. 主线程:   区域分类 + 状态机 + 窗口统计 + 报告输出
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zoneflow::report::{JsonLinesSink, LogSink, ReportSink};
use zoneflow::{pipeline, Args, CounterConfig, JsonLinesSource, StopHandle};

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zoneflow={}", args.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 区域计数系统启动");

    let mut config = match &args.config {
        Some(path) => CounterConfig::load(path)?,
        None => CounterConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;
    config.print_summary();

    let source = JsonLinesSource::open(&args.input)?;

    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(LogSink)];
    if let Some(path) = &args.output {
        sinks.push(Box::new(JsonLinesSink::create(path)?));
    }

    // Ctrl+C 只设置停止标志,计数循环退出前刷新输出
    let stop = StopHandle::new();
    let signal = stop.clone();
    ctrlc::set_handler(move || {
        info!("🛑 收到 Ctrl+C,正在停止...");
        signal.stop();
    })
    .context("注册信号处理失败")?;

    let summary = pipeline::run(source, &config, &mut sinks, args.max_frames, stop)?;
    info!(
        "👋 退出: 进入 {} | 离开 {}",
        summary.total_inflow, summary.total_outflow
    );
    Ok(())
}
