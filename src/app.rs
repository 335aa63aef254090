//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! runs the edit session and drives the plan pipeline: build -> validate ->
//! order -> execute, with every outcome recorded.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::cli::Args;
use crate::config::{default_config_path, load_config_from_xml, Config};
use crate::errors::RenameError;
use crate::logging::init_tracing;
use crate::outcome::OutcomeLog;
use crate::output as out;
use crate::plan::{build_plan, order_plan, validate_plan};
use crate::{codec, editor, exec, shutdown};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var("EDMV_CONFIG") {
            out::print_info(&format!("Using EDMV_CONFIG (explicit):\n  {}", cfg_env));
            return Ok(());
        }
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default edmv config path:\n  {}", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet; a template is created on first run.");
                }
            }
            None => out::print_error("Could not determine a default config path."),
        }
        return Ok(());
    }

    // Config file first, CLI overrides second (CLI wins).
    let mut cfg = Config::default();
    if let Some(settings) = load_config_from_xml() {
        settings.apply_to(&mut cfg);
    }
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; halting at the next operation boundary...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    debug!("Starting edmv: {:?}", args);

    let result = run_pipeline(&args, &cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn run_pipeline(args: &Args, cfg: &Config) -> Result<()> {
    // Positional paths are untrusted text; make them absolute against the
    // cwd without resolving symlinks.
    let originals: Vec<PathBuf> = args
        .files
        .iter()
        .map(|p| std::path::absolute(p).with_context(|| format!("absolutize '{}'", p.display())))
        .collect::<Result<_>>()?;

    let text = codec::emit(&originals);
    let edited = editor::edit_text(cfg, &text)?;
    if shutdown::is_requested() {
        return Err(RenameError::Interrupted.into());
    }
    let lines = codec::parse(&edited);

    let log_path = cfg
        .outcome_log
        .clone()
        .context("no outcome log path; set <outcome_log> in config or pass --outcome-log")?;
    let mut log = OutcomeLog::create(&log_path)?;

    let plan = match build_plan(&originals, &lines).and_then(|plan| {
        validate_plan(&plan, cfg)?;
        Ok(plan)
    }) {
        Ok(plan) => plan,
        Err(e) => return Err(refuse(&mut log, e)),
    };

    if plan.is_empty() {
        info!("edited list matches the original; nothing to do");
        out::print_info("No changes made.");
        return Ok(());
    }

    log.record_plan(&plan);
    let order = order_plan(&plan);

    if cfg.dry_run {
        for op in &order.ops {
            out::print_user(&format!(
                "would rename '{}' -> '{}'",
                op.from.display(),
                op.to.display()
            ));
        }
        out::print_info(&format!(
            "Dry-run: {} operation(s) planned, nothing touched.",
            order.len()
        ));
        return Ok(());
    }

    match exec::execute(&order, &mut log, cfg) {
        Ok(report) => {
            info!(
                renames = plan.steps.len(),
                operations = report.total,
                "all renames applied"
            );
            out::print_success(&format!(
                "Renamed {} file(s) ({} operation(s)). Outcome log: {}",
                plan.steps.len(),
                report.total,
                log.path().display()
            ));
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "execution halted");
            out::print_error(&format!(
                "Execution halted: {}. See the outcome log for the exact prefix applied: {}",
                e,
                log.path().display()
            ));
            Err(e.into())
        }
    }
}

/// Record a validation-stage refusal and surface it. Nothing has been
/// mutated at this point.
fn refuse(log: &mut OutcomeLog, e: RenameError) -> anyhow::Error {
    debug_assert!(e.is_refusal() || matches!(e, RenameError::Interrupted));
    log.record_rejection(&e);
    error!(code = e.code(), error = %e, "plan refused; no files were touched");
    out::print_error(&format!("{e}. No files were touched; fix the edit and retry."));
    e.into()
}
