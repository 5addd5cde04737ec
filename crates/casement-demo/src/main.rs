//! Scripted demo session: an in-memory host, the window manager, and
//! the client view, round-tripping snapshots and commands.

use casement_client::{PointerButton, PointerEvent, WindowManagerView};
use casement_common::{Command, Result, SyncSnapshot};
use casement_core::{MemoryHost, WindowManager};
use tracing_subscriber::EnvFilter;

fn render(view: &WindowManagerView) {
    println!("view ({} boxes):", view.len());
    for (index, window_box) in view.boxes().iter().enumerate() {
        println!(
            "  [{index}] {:<12} class={}",
            window_box.caption,
            window_box.class_name()
        );
    }
}

/// Deliver an outbound snapshot to the view, if one was encoded.
fn deliver(view: &mut WindowManagerView, snapshot: Option<SyncSnapshot>) -> Result<()> {
    if let Some(snapshot) = snapshot {
        tracing::info!(
            payload = %serde_json::to_string(&snapshot).unwrap_or_default(),
            "snapshot -> client"
        );
        view.apply_snapshot(&snapshot)?;
        render(view);
    } else {
        println!("(no re-sync scheduled, nothing sent)");
    }
    Ok(())
}

/// One client activation: view emits a command, server runs a turn.
fn activate(
    manager: &mut WindowManager<MemoryHost>,
    view: &mut WindowManagerView,
    event: PointerEvent,
) -> Result<()> {
    let activation = view.pointer(event);
    let command: Option<Command> = activation.command;
    if let Some(cmd) = command {
        tracing::info!(
            payload = %serde_json::to_string(&cmd).unwrap_or_default(),
            "command -> server"
        );
    }
    deliver(view, manager.process_turn(command)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("casement=debug".parse().expect("valid directive")),
        )
        .init();

    let mut manager = WindowManager::new(MemoryHost::new());
    let mut view = WindowManagerView::new();

    println!("== add three windows ==");
    for caption in ["Inbox", "Monitor", "Scratchpad"] {
        manager.add(caption)?;
    }
    deliver(&mut view, manager.process_turn(None)?)?;

    println!("\n== primary click on box 1 (minimize toggle) ==");
    activate(
        &mut manager,
        &mut view,
        PointerEvent {
            index: 1,
            button: PointerButton::Primary,
        },
    )?;

    println!("\n== secondary click on box 0 (close) ==");
    activate(
        &mut manager,
        &mut view,
        PointerEvent {
            index: 0,
            button: PointerButton::Secondary,
        },
    )?;

    println!("\n== the user closes a window through the host ==");
    if let Some(handle) = manager.registry().handle_at(0) {
        manager.host().close_out_of_band(handle);
    }
    deliver(&mut view, manager.process_turn(None)?)?;

    println!("\n== close all ==");
    manager.close_all()?;
    deliver(&mut view, manager.process_turn(None)?)?;

    Ok(())
}
