use std::time::{Duration, Instant};

use anyhow::Result;

use crate::{
    domain::events::AppEvent,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
    },
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        listing_price = %context.config.offer.listing_price,
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;
    let mut last_tick = Instant::now();

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state()))?;

        let now = Instant::now();
        pump(event_source, orchestrator, now.duration_since(last_tick))?;
        last_tick = now;
    }

    orchestrator.shutdown();
    tracing::info!("TUI shell stopped");

    Ok(())
}

/// One loop iteration: advances the session clocks, then handles at most one
/// input event.
fn pump(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
    elapsed: Duration,
) -> Result<()> {
    orchestrator.handle_event(AppEvent::Tick(elapsed))?;

    if let Some(event) = event_source.next_event()? {
        orchestrator.handle_event(event)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::events::KeyInput,
        infra::config::AppConfig,
        test_support::ScriptedRandom,
        ui::event_source::MockEventSource,
        usecases::{shell::DefaultShellOrchestrator, shell_state::Screen},
    };

    fn orchestrator() -> DefaultShellOrchestrator<ScriptedRandom> {
        DefaultShellOrchestrator::new(&AppConfig::default(), ScriptedRandom::constant(0.5))
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }

    #[test]
    fn orchestrator_stops_on_quit_from_source() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let mut orchestrator = orchestrator();

        pump(&mut source, &mut orchestrator, Duration::ZERO).expect("must pump");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn pump_ticks_even_without_input() {
        let mut source = MockEventSource::from(vec![]);
        let mut orchestrator = orchestrator();

        for _ in 0..40 {
            pump(&mut source, &mut orchestrator, Duration::from_millis(100)).expect("must pump");
        }

        assert_eq!(orchestrator.state().screen(), Screen::Chat);
    }

    #[test]
    fn tick_is_applied_before_the_event() {
        let mut source = MockEventSource::from(vec![AppEvent::InputKey(KeyInput::new(
            "tab", false,
        ))]);
        let mut orchestrator = orchestrator();

        pump(&mut source, &mut orchestrator, Duration::from_secs(10)).expect("must pump");

        assert_eq!(orchestrator.state().screen(), Screen::Calculator);
    }
}
