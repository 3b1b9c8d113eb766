//! Shell commands and their dispatch table.

use std::path::PathBuf;

use strsim::levenshtein;

use crate::{
    currency::{format_signed, format_time},
    errors::ValidationError,
    export::{default_file_name, render_summary, write_summary},
    ledger::{TransactionId, TransactionType},
    session::Clock,
};

use super::context::{LoopControl, ShellContext};
use super::error::CommandError;
use super::output;

const ADD_USAGE: &str =
    "add <cash_sale|digital_sale|other_income|expense> <amount> <description...>";
const DELETE_USAGE: &str = "delete <id>";
const CONFIG_SET_USAGE: &str =
    "config set <currency_symbol|export_dir|confirm_destructive> <value>";

type Handler = fn(&mut ShellContext, &[&str]) -> Result<LoopControl, CommandError>;

pub struct CommandEntry {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    handler: Handler,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "opening",
        usage: "opening <amount>",
        description: "Set the opening cash balance (blank means 0)",
        handler: cmd_opening,
    },
    CommandEntry {
        name: "add",
        usage: ADD_USAGE,
        description: "Record a transaction",
        handler: cmd_add,
    },
    CommandEntry {
        name: "delete",
        usage: DELETE_USAGE,
        description: "Remove a transaction",
        handler: cmd_delete,
    },
    CommandEntry {
        name: "clear",
        usage: "clear",
        description: "Remove all transactions, keeping the opening balance",
        handler: cmd_clear,
    },
    CommandEntry {
        name: "list",
        usage: "list",
        description: "Show transactions, most recent first",
        handler: cmd_list,
    },
    CommandEntry {
        name: "summary",
        usage: "summary",
        description: "Show the day closing summary",
        handler: cmd_summary,
    },
    CommandEntry {
        name: "export",
        usage: "export [path]",
        description: "Write the day closing summary to a text file",
        handler: cmd_export,
    },
    CommandEntry {
        name: "sample",
        usage: "sample",
        description: "Load demonstration data",
        handler: cmd_sample,
    },
    CommandEntry {
        name: "new-day",
        usage: "new-day",
        description: "Discard today's data and start a new day",
        handler: cmd_new_day,
    },
    CommandEntry {
        name: "date",
        usage: "date",
        description: "Show the session date",
        handler: cmd_date,
    },
    CommandEntry {
        name: "config",
        usage: "config [set <key> <value>]",
        description: "Show or change the configuration",
        handler: cmd_config,
    },
    CommandEntry {
        name: "version",
        usage: "version",
        description: "Show build information",
        handler: cmd_version,
    },
    CommandEntry {
        name: "help",
        usage: "help",
        description: "List commands",
        handler: cmd_help,
    },
    CommandEntry {
        name: "exit",
        usage: "exit",
        description: "Leave the shell",
        handler: cmd_exit,
    },
    CommandEntry {
        name: "quit",
        usage: "quit",
        description: "Leave the shell",
        handler: cmd_exit,
    },
];

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|entry| entry.name).collect()
}

pub(crate) fn dispatch(
    context: &mut ShellContext,
    command: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    match COMMANDS.iter().find(|entry| entry.name == command) {
        Some(entry) => (entry.handler)(context, args),
        None => Err(CommandError::UnknownCommand {
            name: command.to_string(),
            suggestion: suggest(command),
        }),
    }
}

fn suggest(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|entry| (levenshtein(input, entry.name), entry.name))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

/// Blank input counts as zero, like an empty form field.
pub(crate) fn parse_opening(raw: Option<&str>) -> Result<f64, CommandError> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a number")))
}

/// Missing or non-numeric amounts are invalid amounts.
pub(crate) fn parse_amount(raw: Option<&str>) -> Result<f64, ValidationError> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .ok_or(ValidationError::InvalidAmount)
}

fn cmd_opening(context: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    let value = parse_opening(args.first().copied())?;
    context.session.set_opening_balance(value)?;
    output::success(format!(
        "Opening balance set to {}",
        context.money(context.session.ledger().opening_balance())
    ));
    Ok(LoopControl::Continue)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    let Some(raw_kind) = args.first() else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    let kind: TransactionType = raw_kind.parse()?;
    let amount = parse_amount(args.get(1).copied())?;
    let description = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();

    let txn = context
        .session
        .add_transaction(kind.key(), amount, &description)?;
    output::success(format!(
        "{} of {} added successfully",
        txn.kind.display_name(),
        context.money(txn.amount)
    ));
    output::info(format!("Transaction id: {}", txn.id));
    Ok(LoopControl::Continue)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    let Some(raw) = args.first() else {
        return Err(CommandError::usage(DELETE_USAGE));
    };
    let id: TransactionId = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a transaction id")))?;
    if context.session.ledger().transaction(id).is_none() {
        output::warning(format!("No transaction with id {id}"));
        return Ok(LoopControl::Continue);
    }
    if !context.confirm("Are you sure you want to delete this transaction?")? {
        output::info("Deletion cancelled.");
        return Ok(LoopControl::Continue);
    }
    context.session.delete_transaction(id);
    output::success("Transaction deleted successfully");
    Ok(LoopControl::Continue)
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    if !context.confirm(
        "Are you sure you want to clear all transactions? This action cannot be undone.",
    )? {
        output::info("Clear cancelled.");
        return Ok(LoopControl::Continue);
    }
    context.session.clear_all_transactions();
    output::success("All transactions cleared");
    Ok(LoopControl::Continue)
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    let transactions = context.session.list_transactions_sorted();
    if transactions.is_empty() {
        output::info("No transactions added yet");
        return Ok(LoopControl::Continue);
    }
    output::section("Transactions");
    for txn in transactions {
        println!(
            "#{:<4} {}  {} {:<14} {:>12}  {}",
            txn.id,
            format_time(txn.timestamp),
            txn.kind.icon(),
            txn.kind.display_name(),
            format_signed(txn, &context.config.currency_symbol),
            txn.description
        );
    }
    Ok(LoopControl::Continue)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    let text = render_summary(
        context.session.ledger(),
        context.session.current_date(),
        &context.config.currency_symbol,
    );
    print!("{text}");
    Ok(LoopControl::Continue)
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    let path = match args.first() {
        Some(raw) => PathBuf::from(raw),
        None => {
            let today = context.session.clock().today();
            context.config.export_dir().join(default_file_name(today))
        }
    };
    let text = render_summary(
        context.session.ledger(),
        context.session.current_date(),
        &context.config.currency_symbol,
    );
    write_summary(&path, &text)?;
    output::success(format!("Summary exported to {}", path.display()));
    Ok(LoopControl::Continue)
}

fn cmd_sample(context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    context.session.load_sample_data();
    output::success("Sample data loaded");
    Ok(LoopControl::Continue)
}

fn cmd_new_day(context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    if !context.confirm("Are you sure you want to start a new day? All current data will be cleared.")? {
        output::info("Keeping the current day.");
        return Ok(LoopControl::Continue);
    }
    context.session.start_new_day();
    output::success("New day started. All data cleared.");
    output::info(context.long_date());
    Ok(LoopControl::Continue)
}

fn cmd_date(context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    output::info(context.long_date());
    Ok(LoopControl::Continue)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    match args {
        [] => {}
        ["set", key, rest @ ..] => {
            let mut updated = context.config.clone();
            updated.set(key, &rest.join(" "))?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            output::success(format!("Setting `{key}` saved"));
            return Ok(LoopControl::Continue);
        }
        _ => return Err(CommandError::usage(CONFIG_SET_USAGE)),
    }
    output::section("Configuration");
    println!("file:                {}", context.config_manager.path().display());
    println!("currency_symbol:     {}", context.config.currency_symbol);
    println!("export_dir:          {}", context.config.export_dir().display());
    println!("confirm_destructive: {}", context.config.confirm_destructive);
    Ok(LoopControl::Continue)
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    println!("day_ledger {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build {} ({}, {}) at {}",
        env!("DAY_LEDGER_BUILD_HASH"),
        env!("DAY_LEDGER_BUILD_TARGET"),
        env!("DAY_LEDGER_BUILD_PROFILE"),
        env!("DAY_LEDGER_BUILD_TIMESTAMP")
    );
    Ok(LoopControl::Continue)
}

fn cmd_help(_context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    output::section("Commands");
    for entry in COMMANDS {
        println!("  {:<10} {}", entry.name, entry.description);
        println!("  {:<10} {}", "", entry.usage);
    }
    Ok(LoopControl::Continue)
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    Ok(LoopControl::Exit)
}
