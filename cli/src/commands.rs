use tempo_core::{ElapsedFields, TimerError, TimerState};

use crate::CliContext;

pub async fn start(label: &str, ctx: &CliContext) -> Result<String, TimerError> {
    ctx.registry.start(label).await?;
    tracing::info!(label, "Timer started");
    Ok(format!("Timer '{}' started", label))
}

pub async fn stop(label: &str, ctx: &CliContext) -> Result<String, TimerError> {
    let elapsed = ctx.registry.stop(label).await?;
    let fields = ElapsedFields::from_duration(elapsed);
    tracing::info!(label, elapsed = %fields, "Timer stopped");
    Ok(format!("\nTimer '{}' stopped at {}", label, fields))
}

pub async fn restart(label: &str, ctx: &CliContext) -> Result<String, TimerError> {
    ctx.registry.restart(label).await?;
    let elapsed = ctx.registry.get(label).await?.fields();
    tracing::info!(label, elapsed = %elapsed, "Timer restarted");
    Ok(format!("Timer '{}' restarted", label))
}

pub async fn status(label: &str, ctx: &CliContext) -> Result<String, TimerError> {
    let status = ctx.registry.get(label).await?;
    Ok(format!(
        "Timer '{}' is {} ({})",
        status.label,
        status.state,
        status.fields()
    ))
}

pub async fn list(ctx: &CliContext) -> String {
    let timers = ctx.registry.list().await;
    if timers.is_empty() {
        return "No timers".to_string();
    }

    let mut out = format!("{:<30} {:<10} Elapsed\n", "Timer", "State");
    out.push_str(&"-".repeat(50));
    for timer in &timers {
        let marker = if timer.state == TimerState::Running {
            " *"
        } else {
            ""
        };
        out.push_str(&format!(
            "\n{:<30} {:<10} {}{}",
            timer.label,
            timer.state,
            timer.fields(),
            marker
        ));
    }
    out.push_str(&format!("\n\nTotal: {} timers", timers.len()));
    out
}

pub async fn remove(label: &str, ctx: &CliContext) -> Result<String, TimerError> {
    let elapsed = ctx.registry.remove(label).await?;
    tracing::info!(label, "Timer removed");
    Ok(format!(
        "Timer '{}' removed after {}",
        label,
        ElapsedFields::from_duration(elapsed)
    ))
}

pub fn show_settings(ctx: &CliContext) -> String {
    let path = tempo_core::AppConfig::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| e.to_string());
    format!(
        "Poll interval: {} ms\nLive updates: {}\nConfig file: {}",
        ctx.registry.poll_interval().as_millis(),
        ctx.config.display.live_updates,
        path
    )
}

pub async fn exit(ctx: &CliContext) -> String {
    let stopped = ctx.shutdown().await;
    tracing::info!(stopped, "Exiting");
    if stopped > 0 {
        format!("\nStopped {} running timer(s)\nExiting application.", stopped)
    } else {
        "Exiting application.".to_string()
    }
}
