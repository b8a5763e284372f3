//! The command loop: one worker thread that owns the scene.
//!
//! Producers post [`Operation`]s through the bounded queue. The worker applies
//! them in arrival order and, whenever one completes a frame, renders the scene
//! into the current surface, hands that surface to the [`FrameSink`], and starts
//! over with a new surface and an empty scene.
//!
//! Lifecycle: `Uninitialized` -> `Running` -> `Stopped`. A stop request queues
//! a shutdown token behind pending work and waits for the worker to exit;
//! anything posted after the request is never applied.

use std::mem;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;
use crate::operation::Operation;
use crate::queue::{self, CommandReceiver, CommandSender, Message, QueueError, DEFAULT_CAPACITY};
use crate::render::render_scene;
use crate::scene::SceneState;
use crate::surface::{SurfaceError, SurfaceFactory};

const WORKER_NAME: &str = "painter-loop";

#[derive(Error, Debug)]
pub enum LoopError {
    #[error("command loop already started")]
    AlreadyStarted,

    #[error("command loop has been stopped")]
    Stopped,

    #[error("invalid loop configuration: {0}")]
    InvalidConfig(String),

    #[error("render target: {0}")]
    Surface(#[from] SurfaceError),

    #[error("command queue disconnected without a shutdown request")]
    Disconnected,

    #[error("command loop worker panicked")]
    WorkerPanicked,

    #[error("failed to spawn command loop worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Loop construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Size of every render target the loop allocates.
    pub canvas: Size,
    /// Maximum number of queued, not yet applied operations.
    pub queue_capacity: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            canvas: Size::default(),
            queue_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<(), LoopError> {
        if self.canvas.is_empty() {
            return Err(LoopError::InvalidConfig(format!(
                "canvas must not be empty, got {}",
                self.canvas
            )));
        }
        if self.queue_capacity == 0 {
            return Err(LoopError::InvalidConfig(
                "queue capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Stopped,
}

/// Counters reported when the worker exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Top-level operations pulled from the queue and applied.
    pub operations: u64,
    /// Frames delivered to the sink.
    pub frames: u64,
}

/// A completed frame as delivered to the sink. The sink owns the surface.
#[derive(Debug)]
pub struct Frame<S> {
    sequence: u64,
    surface: S,
}

impl<S> Frame<S> {
    /// 1-based position of this frame in delivery order.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Receives finished frames, synchronously, on the loop worker thread.
///
/// A slow sink stalls the loop and eventually the producers.
pub trait FrameSink<S>: Send + 'static {
    fn on_frame(&mut self, frame: Frame<S>);
}

impl<S, F> FrameSink<S> for F
where
    F: FnMut(Frame<S>) + Send + 'static,
{
    fn on_frame(&mut self, frame: Frame<S>) {
        self(frame)
    }
}

/// Handle to the command loop.
pub struct CommandLoop {
    config: LoopConfig,
    sender: CommandSender,
    receiver: Option<CommandReceiver>,
    worker: Option<JoinHandle<Result<LoopStats, LoopError>>>,
    state: LoopState,
}

impl CommandLoop {
    pub fn new(config: LoopConfig) -> Result<Self, LoopError> {
        config.validate()?;
        let (sender, receiver) = queue::channel(config.queue_capacity);
        Ok(Self {
            config,
            sender,
            receiver: Some(receiver),
            worker: None,
            state: LoopState::Uninitialized,
        })
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// A producer handle that other threads can post through.
    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    /// Allocate the first render target and launch the worker thread.
    pub fn start<F, K>(&mut self, mut factory: F, sink: K) -> Result<(), LoopError>
    where
        F: SurfaceFactory,
        K: FrameSink<F::Surface>,
    {
        match self.state {
            LoopState::Running => return Err(LoopError::AlreadyStarted),
            LoopState::Stopped => return Err(LoopError::Stopped),
            LoopState::Uninitialized => {}
        }

        let target = factory.create(self.config.canvas)?;
        let receiver = self.receiver.take().ok_or(LoopError::Stopped)?;
        let worker = Worker {
            factory,
            sink,
            canvas: self.config.canvas,
            scene: SceneState::new(),
            target,
            stats: LoopStats::default(),
        };

        let handle = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || worker.run(receiver))?;

        self.worker = Some(handle);
        self.state = LoopState::Running;
        log::info!(
            "command loop started: canvas {}, queue capacity {}",
            self.config.canvas,
            self.config.queue_capacity
        );
        Ok(())
    }

    /// Enqueue an operation. Blocks only while the queue is full.
    ///
    /// After a stop request the operation is discarded.
    pub fn post(&self, op: Operation) {
        if let Err(QueueError::Closed) = self.sender.push(op) {
            log::debug!("command loop closed, operation discarded");
        }
    }

    /// Queue the shutdown token and block until the worker has exited.
    ///
    /// Operations queued ahead of the token are still applied. Calling this
    /// on a loop that never started simply marks it stopped.
    pub fn stop_and_wait(&mut self) -> Result<LoopStats, LoopError> {
        match self.state {
            LoopState::Stopped => return Err(LoopError::Stopped),
            LoopState::Uninitialized => {
                self.sender.seal();
                self.receiver = None;
                self.state = LoopState::Stopped;
                return Ok(LoopStats::default());
            }
            LoopState::Running => {}
        }

        self.state = LoopState::Stopped;
        if self.sender.close().is_err() {
            log::warn!("command loop worker exited before the stop request");
        }

        let handle = self.worker.take().ok_or(LoopError::Stopped)?;
        let stats = handle.join().map_err(|_| LoopError::WorkerPanicked)??;
        log::info!(
            "command loop stopped: {} operations, {} frames",
            stats.operations,
            stats.frames
        );
        Ok(stats)
    }
}

impl Drop for CommandLoop {
    fn drop(&mut self) {
        if self.state == LoopState::Running {
            if let Err(e) = self.stop_and_wait() {
                log::error!("command loop shutdown failed: {}", e);
            }
        }
    }
}

/// State owned by the worker thread.
struct Worker<F: SurfaceFactory, K> {
    factory: F,
    sink: K,
    canvas: Size,
    scene: SceneState,
    target: F::Surface,
    stats: LoopStats,
}

impl<F, K> Worker<F, K>
where
    F: SurfaceFactory,
    K: FrameSink<F::Surface>,
{
    fn run(mut self, receiver: CommandReceiver) -> Result<LoopStats, LoopError> {
        loop {
            match receiver.pull() {
                Some(Message::Operation(op)) => {
                    self.stats.operations += 1;
                    log::trace!("applying {}", op.name());
                    if op.apply(&mut self.scene) {
                        self.flush()?;
                    }
                }
                Some(Message::Shutdown) => break,
                None => {
                    log::error!("command queue disconnected without a shutdown token");
                    return Err(LoopError::Disconnected);
                }
            }
        }
        Ok(self.stats)
    }

    /// Render the scene, deliver the frame, and start a new one.
    fn flush(&mut self) -> Result<(), LoopError> {
        render_scene(&self.scene, &mut self.target);

        let next = self.factory.create(self.canvas)?;
        let finished = mem::replace(&mut self.target, next);
        self.scene = SceneState::new();

        self.stats.frames += 1;
        log::debug!("frame {} complete", self.stats.frames);
        self.sink.on_frame(Frame {
            sequence: self.stats.frames,
            surface: finished,
        });
        Ok(())
    }
}
