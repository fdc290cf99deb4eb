use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use upload_core::{update, Msg, UploadController};
use upload_logging::{set_attempt, upload_info};

use super::effects::EffectRunner;
use super::script::{AutoScript, Outcome, ScriptStep};
use super::timers::TimerQueue;
use super::ui;
use crate::cli::Cli;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Quit,
}

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(cli.engine_settings(), app_tx.clone())
        .context("starting upload engine")?;

    let tick_tx = app_tx.clone();
    thread::Builder::new()
        .name("ui-tick".to_string())
        .spawn(move || {
            while tick_tx.send(AppEvent::Msg(Msg::Tick)).is_ok() {
                thread::sleep(TICK_INTERVAL);
            }
        })
        .context("starting tick thread")?;

    let mut app = App::new(runner);
    app.render();

    let mut script = match &cli.file {
        Some(path) => {
            let candidate = ui::input::candidate_from_path(path).map_err(anyhow::Error::msg)?;
            let _ = app_tx.send(AppEvent::Msg(Msg::FileChosen(candidate)));
            Some(AutoScript::new(!cli.no_download))
        }
        None => {
            spawn_stdin_reader(app_tx.clone())?;
            println!("{}", ui::input::HELP);
            None
        }
    };
    drop(app_tx);

    while let Ok(event) = app_rx.recv() {
        let msg = match event {
            AppEvent::Quit => break,
            AppEvent::Msg(msg) => msg,
        };
        app.handle(msg);

        let Some(script) = script.as_mut() else {
            continue;
        };
        match script.next(&app.state.view()) {
            ScriptStep::Continue(msgs) => {
                for msg in msgs {
                    app.handle(msg);
                }
            }
            ScriptStep::Finished(outcome) => return Ok(report(outcome)),
        }
    }

    Ok(ExitCode::SUCCESS)
}

struct App {
    state: UploadController,
    timers: TimerQueue,
    runner: EffectRunner,
    last_frame: Vec<String>,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: UploadController::new(),
            timers: TimerQueue::default(),
            runner,
            last_frame: Vec::new(),
        }
    }

    fn handle(&mut self, msg: Msg) {
        let now = Instant::now();
        if matches!(msg, Msg::Tick) {
            for timer in self.timers.drain_due(now) {
                self.dispatch(Msg::TimerFired(timer), now);
            }
        }
        self.dispatch(msg, now);
        self.render();
    }

    fn dispatch(&mut self, msg: Msg, now: Instant) {
        if let Some(attempt) = attempt_of(&msg) {
            set_attempt(attempt);
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects, &mut self.timers, now);
    }

    fn render(&mut self) {
        if !self.state.consume_dirty() && !self.last_frame.is_empty() {
            return;
        }
        let frame = ui::render::render(&self.state.view());
        if frame == self.last_frame {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "----");
        for line in &frame {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
        self.last_frame = frame;
    }
}

fn attempt_of(msg: &Msg) -> Option<u64> {
    match msg {
        Msg::ResponseReceived { attempt } | Msg::UploadFinished { attempt, .. } => Some(*attempt),
        Msg::TimerFired(upload_core::Timer::Finalize { attempt })
        | Msg::TimerFired(upload_core::Timer::Reveal { attempt }) => Some(*attempt),
        _ => None,
    }
}

fn spawn_stdin_reader(app_tx: mpsc::Sender<AppEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match ui::input::parse_command(&line) {
                    Ok(ui::input::Command::Msg(msg)) => {
                        if app_tx.send(AppEvent::Msg(msg)).is_err() {
                            return;
                        }
                    }
                    Ok(ui::input::Command::Help) => println!("{}", ui::input::HELP),
                    Ok(ui::input::Command::Quit) => break,
                    Err(err) => eprintln!("{err}"),
                }
            }
            let _ = app_tx.send(AppEvent::Quit);
        })
        .context("starting stdin reader")?;
    Ok(())
}

fn report(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Saved(path) => {
            upload_info!("run finished, document at {:?}", path);
            println!("Saved {}", path.display());
            ExitCode::SUCCESS
        }
        Outcome::Ready(route) => {
            println!("Ready at {route}");
            ExitCode::SUCCESS
        }
        Outcome::Failed(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upload_core::Timer;

    #[test]
    fn attempt_is_read_from_attempt_messages() {
        assert_eq!(attempt_of(&Msg::ResponseReceived { attempt: 4 }), Some(4));
        assert_eq!(
            attempt_of(&Msg::TimerFired(Timer::Reveal { attempt: 2 })),
            Some(2)
        );
        assert_eq!(
            attempt_of(&Msg::TimerFired(Timer::DismissError { generation: 9 })),
            None
        );
        assert_eq!(attempt_of(&Msg::Tick), None);
    }
}
