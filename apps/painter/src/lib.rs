use std::io::Read;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use painter_core::{
    CommandLoop, CommandSender, FrameSink, LoopConfig, LoopError, LoopStats, Operation,
    SurfaceFactory,
};
use painter_lang::{ParseError, Script, ScriptParser};
use painter_render::{CanvasFactory, RecordingFactory};

pub mod cli;
pub mod config;
pub mod demos;
pub mod logging;
pub mod sink;

use cli::CliArgs;
use config::{ConfigError, OutputFormat, PainterConfig};
use sink::{JsonSink, PngSink};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("command loop: {0}")]
    Loop(#[from] LoopError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

/// Wires the script parser to a command loop.
///
/// Each submitted script is parsed in the caller's thread and, if valid,
/// posted as a single batch. Rejected scripts never reach the loop.
pub struct Painter {
    parser: ScriptParser,
    command_loop: CommandLoop,
}

impl Painter {
    pub fn new(config: LoopConfig) -> Result<Self, AppError> {
        Ok(Self {
            parser: ScriptParser::new(),
            command_loop: CommandLoop::new(config)?,
        })
    }

    pub fn start<F, K>(&mut self, factory: F, sink: K) -> Result<(), AppError>
    where
        F: SurfaceFactory,
        K: FrameSink<F::Surface>,
    {
        self.command_loop.start(factory, sink)?;
        Ok(())
    }

    /// Parse `script` and post it as one batch. Returns the number of
    /// operations in the batch.
    pub fn submit(&self, script: &Script) -> Result<usize, AppError> {
        let batch = script.parse(&self.parser)?;
        let count = match &batch {
            Operation::List(ops) => ops.len(),
            _ => 1,
        };
        self.command_loop.post(batch);
        Ok(count)
    }

    pub fn post(&self, op: Operation) {
        self.command_loop.post(op);
    }

    pub fn sender(&self) -> CommandSender {
        self.command_loop.sender()
    }

    /// Stop the loop after everything already submitted has been applied.
    pub fn shutdown(&mut self) -> Result<LoopStats, AppError> {
        Ok(self.command_loop.stop_and_wait()?)
    }
}

/// Outcome of a [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub stats: LoopStats,
}

/// Feed `scripts` to a fresh loop, writing frames as configured.
///
/// A script that fails to parse is logged and skipped; the rest still run.
pub fn run(
    config: &PainterConfig,
    scripts: &[Script],
    interval: Duration,
) -> Result<RunSummary, AppError> {
    std::fs::create_dir_all(&config.output_dir)?;

    let mut painter = Painter::new(config.loop_config())?;
    match config.output {
        OutputFormat::Png => painter.start(CanvasFactory, PngSink::new(&config.output_dir))?,
        OutputFormat::Json => {
            painter.start(RecordingFactory, JsonSink::new(&config.output_dir))?
        }
    }

    let mut summary = RunSummary::default();
    for (i, script) in scripts.iter().enumerate() {
        if i > 0 && !interval.is_zero() {
            thread::sleep(interval);
        }
        match painter.submit(script) {
            Ok(count) => {
                log::info!("{}: submitted {} operations", script.name, count);
                summary.accepted += 1;
            }
            Err(AppError::Parse(e)) => {
                log::error!("{}: rejected: {}", script.name, e);
                summary.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    summary.stats = painter.shutdown()?;
    Ok(summary)
}

/// Resolve the scripts named on the command line.
pub fn collect_scripts(args: &CliArgs) -> Result<Vec<Script>, AppError> {
    let mut scripts = Vec::new();

    if let Some(name) = &args.demo {
        let demo = demos::by_name(name).ok_or_else(|| {
            AppError::Usage(format!(
                "unknown demo {name:?}, expected one of: {}",
                demos::DEMO_NAMES.join(", ")
            ))
        })?;
        scripts.extend(demo);
    }

    for path in &args.scripts {
        if path == "-" {
            scripts.push(read_stdin()?);
        } else {
            scripts.push(Script::from_file(path)?);
        }
    }

    if scripts.is_empty() {
        scripts.push(read_stdin()?);
    }
    Ok(scripts)
}

fn read_stdin() -> Result<Script, AppError> {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(Script::new("<stdin>", &source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use painter_core::{Color, Frame};
    use painter_render::{Canvas, Recording};
    use std::sync::{Arc, Mutex};

    fn recording_painter() -> (Painter, Arc<Mutex<Vec<Recording>>>) {
        let frames: Arc<Mutex<Vec<Recording>>> = Arc::default();
        let sink_frames = Arc::clone(&frames);
        let mut painter = Painter::new(LoopConfig::default()).unwrap();
        painter
            .start(RecordingFactory, move |frame: Frame<Recording>| {
                sink_frames.lock().unwrap().push(frame.into_surface());
            })
            .unwrap();
        (painter, frames)
    }

    #[test]
    fn test_submit_posts_whole_batch() {
        let (mut painter, frames) = recording_painter();
        let n = painter
            .submit(&Script::new("t", "green\nbgrect 0.25 0.25 0.75 0.75\nupdate"))
            .unwrap();
        assert_eq!(n, 3);
        let stats = painter.shutdown().unwrap();
        assert_eq!(stats.operations, 1);

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].background(), Some(Color::GREEN));
        assert_eq!(frames[0].shapes().count(), 1);
    }

    #[test]
    fn test_huge_coordinates_still_produce_frames() {
        let (mut painter, frames) = recording_painter();
        painter
            .submit(&Script::new("far", "figure inf 1e10\nmove -1e300 0.5\nupdate"))
            .unwrap();
        painter.submit(&Script::new("next", "green\nupdate")).unwrap();
        let stats = painter.shutdown().unwrap();
        assert_eq!(stats.frames, 2);

        let frames = frames.lock().unwrap();
        assert_eq!(frames[0].shapes().count(), 2);
        assert_eq!(frames[1].background(), Some(Color::GREEN));
    }

    #[test]
    fn test_rejected_script_never_reaches_loop() {
        let (mut painter, frames) = recording_painter();
        let err = painter
            .submit(&Script::new("bad", "white\nupdate\nbgrect 1 2"))
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::InsufficientParams { .. })));
        let stats = painter.shutdown().unwrap();
        assert_eq!(stats.operations, 0);
        assert!(frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_writes_png_frames() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("frames");
        let config = PainterConfig {
            canvas_width: 40,
            canvas_height: 40,
            output_dir: dir.clone(),
            ..PainterConfig::default()
        };
        let scripts = vec![
            Script::new("one", "white\nupdate"),
            Script::new("broken", "spin 3"),
            Script::new("two", "green\nbgrect 0 0 0.5 0.5\nupdate"),
        ];
        let summary = run(&config, &scripts, Duration::ZERO).unwrap();
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.stats.frames, 2);

        assert!(dir.join("frame-0001.png").is_file());
        assert!(dir.join("frame-0002.png").is_file());
        assert!(!dir.join("frame-0003.png").exists());
    }

    #[test]
    fn test_run_writes_json_recordings() {
        let dir = tempfile::tempdir().unwrap();
        let config = PainterConfig {
            output_dir: dir.path().to_path_buf(),
            output: OutputFormat::Json,
            ..PainterConfig::default()
        };
        let summary = run(&config, &demos::green_border(), Duration::ZERO).unwrap();
        assert_eq!(summary.stats.frames, 1);

        let json = std::fs::read_to_string(dir.path().join("frame-0001.json")).unwrap();
        let rec = Recording::from_json(&json).unwrap();
        assert_eq!(rec.background(), Some(Color::GREEN));
        assert_eq!(rec.shapes().count(), 1);
    }

    #[test]
    fn test_diagonal_demo_frames() {
        // Every payload after the first moves figures that the previous frame
        // already flushed, so only the first frame shows a figure.
        let (mut painter, frames) = recording_painter();
        for script in demos::DiagonalFigure::default().scripts() {
            painter.submit(&script).unwrap();
        }
        painter.shutdown().unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 8);
        assert_eq!(frames[0].background(), Some(Color::WHITE));
        assert_eq!(frames[0].shapes().count(), 2);
        assert!(frames[1..].iter().all(|f| f.shapes().count() == 0));
    }

    #[test]
    fn test_multiple_producers_share_one_loop() {
        let frames: Arc<Mutex<Vec<Canvas>>> = Arc::default();
        let sink_frames = Arc::clone(&frames);
        let mut painter = Painter::new(LoopConfig {
            canvas: painter_core::Size::new(16, 16),
            queue_capacity: 4,
        })
        .unwrap();
        painter
            .start(CanvasFactory, move |frame: Frame<Canvas>| {
                sink_frames.lock().unwrap().push(frame.into_surface());
            })
            .unwrap();

        let producers: Vec<_> = (0..3)
            .map(|_| {
                let tx = painter.sender();
                thread::spawn(move || {
                    for _ in 0..10 {
                        tx.push(Operation::List(vec![Operation::GreenFill, Operation::Update]))
                            .unwrap();
                    }
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }
        painter.post(Operation::Update);
        let stats = painter.shutdown().unwrap();
        assert_eq!(stats, LoopStats { operations: 31, frames: 31 });

        let frames = frames.lock().unwrap();
        assert!(frames[..30].iter().all(|c| c.pixel(0, 0) == Some(Color::GREEN)));
        assert_eq!(frames[30].pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_collect_scripts_unknown_demo() {
        let args = CliArgs {
            demo: Some("spiral".into()),
            ..CliArgs::default()
        };
        assert!(matches!(collect_scripts(&args), Err(AppError::Usage(_))));
    }
}
