//! CLI commands

use multisig_approval::{WalletConfig, WalletEvent};
use multisig_core::{Amount, Payload, Target};
use std::path::Path;

use crate::context::AppContext;
use crate::script::{load_script, Call, ScriptLine};

/// Totals for a script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Print the owners and quorum of a config file
pub fn validate(config_path: &Path) -> Result<WalletConfig, anyhow::Error> {
    let config = WalletConfig::from_file(config_path)?;

    println!(
        "✅ Config valid: {}-of-{} owners",
        config.min_approvals,
        config.owners.len()
    );
    for owner in &config.owners {
        println!("   owner {}", owner);
    }
    Ok(config)
}

/// Run every call in order; rejected calls are reported and skipped
pub async fn run_calls(ctx: &mut AppContext, calls: &[ScriptLine]) -> RunSummary {
    let mut summary = RunSummary::default();

    for ScriptLine { line, call } in calls {
        match ctx.apply(call).await {
            Ok(outcome) => {
                summary.accepted += 1;
                println!("✅ line {}: {} {}", line, call.caller().principal(), outcome);
            }
            Err(e) => {
                summary.rejected += 1;
                println!("❌ line {}: {} [{}] {}", line, call.op(), e.code(), e);
            }
        }
        print_events(&ctx.drain_events());
    }

    summary
}

/// Load a script file and run it
pub async fn run(ctx: &mut AppContext, script_path: &Path) -> Result<RunSummary, anyhow::Error> {
    let calls = load_script(script_path)?;
    let summary = run_calls(ctx, &calls).await;
    print_summary(ctx, summary).await;
    Ok(summary)
}

/// Submit, approve, revoke, re-approve to quorum, then execute
pub async fn demo(ctx: &mut AppContext, value: Amount) -> Result<RunSummary, anyhow::Error> {
    let owners = ctx.engine.owners().to_vec();
    let quorum = ctx.engine.quorum();
    let (first, last) = match (owners.first(), owners.last()) {
        (Some(first), Some(last)) => (first.clone(), last.clone()),
        _ => anyhow::bail!("wallet has no owners"),
    };

    let index = ctx.engine.transaction_count();
    let mut calls = vec![
        Call::Submit {
            caller: first.clone(),
            target: Target::new("demo-target")?,
            value,
            payload: Payload::new(b"blob".to_vec()),
        },
        Call::Approve {
            caller: first.clone(),
            index,
        },
        Call::Revoke {
            caller: first.clone(),
            index,
        },
    ];
    calls.extend(owners.iter().take(quorum).map(|owner| Call::Approve {
        caller: owner.clone(),
        index,
    }));
    calls.push(Call::Execute {
        caller: last,
        index,
    });

    let lines: Vec<ScriptLine> = calls
        .into_iter()
        .enumerate()
        .map(|(i, call)| ScriptLine { line: i + 1, call })
        .collect();

    let summary = run_calls(ctx, &lines).await;

    if !ctx.engine.transaction(index)?.is_executed() {
        println!("ℹ️  tx {} still pending; any owner may retry execute", index);
    }
    print_summary(ctx, summary).await;
    Ok(summary)
}

fn print_events(events: &[WalletEvent]) {
    for event in events {
        match event {
            WalletEvent::Submit { index } => println!("   event Submit({})", index),
            WalletEvent::Approve { owner, index } => {
                println!("   event Approve({}, {})", owner, index)
            }
            WalletEvent::Revoke { owner, index } => {
                println!("   event Revoke({}, {})", owner, index)
            }
            WalletEvent::Execute { index } => println!("   event Execute({})", index),
        }
    }
}

async fn print_summary(ctx: &AppContext, summary: RunSummary) {
    let stats = ctx.engine.stats();
    println!(
        "Done: {} accepted, {} rejected | {} txs ({} pending, {} executed) | treasury {}",
        summary.accepted,
        summary.rejected,
        stats.total,
        stats.pending,
        stats.executed,
        ctx.treasury.balance().await
    );
}
