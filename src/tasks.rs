//! Threads of control
//!
//! Four loops share two locks and one queue:
//! - serial reader: reads bytes, reassembles and routes frames (link lock)
//! - watchdog: polls the liveness timers (link lock)
//! - renderer: advances and shows the current animation (scheduler lock)
//! - command intake: drains the queue into the scheduler (scheduler lock)
//!
//! Each loop body is also exposed as a single step so it can be driven
//! without timers. Locks are held for one frame, one poll, one tick or one
//! command and are never held while waiting on I/O or on the queue.
//!
//! The loops are generic, so they are spawned through thin concrete
//! `#[embassy_executor::task]` wrappers in the firmware binary.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker, Timer, with_timeout};

use crate::channel::{CommandReceiver, CommandSender};
use crate::config::READ_CHUNK_SIZE;
use crate::frame_scheduler::FrameScheduler;
use crate::link::Link;
use crate::log::log;
use crate::protocol::AnimationCommand;
use crate::scheduler::AnimationScheduler;
use crate::{LightStrip, SerialInput};

/// Link state behind its own lock
pub type SharedLink = Mutex<CriticalSectionRawMutex, Link>;

/// Animation state behind its own lock
pub type SharedScheduler<S, const N: usize> =
    Mutex<CriticalSectionRawMutex, AnimationScheduler<S, N>>;

/// Feed one chunk of serial bytes through the link
///
/// Every recovered frame is processed under its own link lock. Indicator
/// changes go straight to the scheduler; animation frames are enqueued,
/// waiting while the queue is full.
pub async fn pump<S: LightStrip, const N: usize>(
    bytes: &[u8],
    now: Instant,
    link: &SharedLink,
    scheduler: &SharedScheduler<S, N>,
    commands: CommandSender<'_>,
) {
    link.lock().await.ingest(bytes);

    loop {
        let dispatch = {
            let mut link = link.lock().await;
            link.next_dispatch(now)
        };
        let Some(dispatch) = dispatch else {
            break;
        };

        if let Some(indicator) = dispatch.indicator {
            scheduler.lock().await.apply_indicator(indicator);
        }
        if let Some(frame) = dispatch.forward {
            commands.send(frame).await;
        }
    }
}

/// Run one watchdog poll
pub async fn check_link<S: LightStrip, const N: usize>(
    now: Instant,
    link: &SharedLink,
    scheduler: &SharedScheduler<S, N>,
) {
    let indicator = link.lock().await.check_timeouts(now);
    if let Some(indicator) = indicator {
        scheduler.lock().await.apply_indicator(indicator);
    }
}

/// Wait for one queued frame and apply it
///
/// Frames that do not decode are logged and dropped.
pub async fn process_next<S: LightStrip, const N: usize>(
    commands: CommandReceiver<'_>,
    scheduler: &SharedScheduler<S, N>,
) {
    let frame = commands.receive().await;
    match AnimationCommand::decode(&frame) {
        Ok(command) => scheduler.lock().await.apply(command),
        Err(error) => {
            log!("[tasks.process_next] dropping frame: {:?}", error);
        }
    }
}

/// Serial reader loop
///
/// Each read is bounded by `read_timeout`; a timeout reads as zero bytes.
pub async fn run_serial_reader<R: SerialInput, S: LightStrip, const N: usize>(
    mut serial: R,
    read_timeout: Duration,
    link: &SharedLink,
    scheduler: &SharedScheduler<S, N>,
    commands: CommandSender<'_>,
) -> ! {
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let read = with_timeout(read_timeout, serial.read(&mut chunk))
            .await
            .unwrap_or(0)
            .min(chunk.len());
        if read == 0 {
            continue;
        }
        pump(&chunk[..read], Instant::now(), link, scheduler, commands).await;
    }
}

/// Watchdog loop
///
/// Runs whether or not any bytes arrive, so a silent link is detected too.
pub async fn run_watchdog<S: LightStrip, const N: usize>(
    period: Duration,
    link: &SharedLink,
    scheduler: &SharedScheduler<S, N>,
) -> ! {
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        check_link(Instant::now(), link, scheduler).await;
    }
}

/// Render loop
///
/// Every animation advances by exactly `frame_duration` per tick.
pub async fn run_renderer<S: LightStrip, const N: usize>(
    frame_duration: Duration,
    scheduler: &SharedScheduler<S, N>,
) -> ! {
    let mut frames = FrameScheduler::new(frame_duration);
    loop {
        scheduler.lock().await.tick(frame_duration);
        let result = frames.tick(Instant::now());
        Timer::at(result.next_deadline).await;
    }
}

/// Command intake loop
pub async fn run_command_intake<S: LightStrip, const N: usize>(
    commands: CommandReceiver<'_>,
    scheduler: &SharedScheduler<S, N>,
) -> ! {
    loop {
        process_next(commands, scheduler).await;
    }
}
