// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dotlight-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dotlight and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dotlight CLI entrypoint.
//!
//! Renders a DOT source headlessly, then reads host messages (one JSON object per line) from
//! stdin and answers each with a JSON snapshot on stdout. Logs go to stderr.

use std::error::Error;
use std::path::PathBuf;

use dotlight::protocol::{host_message_schema, HostMessage};
use dotlight::render::HeadlessEngine;
use dotlight::{Command, GraphController, HostSurface, Mail, RetryPolicy, WidgetConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ELEMENT_ID: &str = "stdout";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<source.dot>] [--config <config.json>]\n  {program} [--source <source.dot>] [--config <config.json>]\n  {program} --print-schema\n\nReads host messages from stdin, one JSON object per line, e.g.\n  {{\"action\":\"select\",\"ids\":[\"a\"],\"additive\":false}}\n  {{\"action\":\"search\",\"query\":\"foo\"}}\n  {{\"action\":\"set\",\"key\":\"selected_direction\",\"value\":\"upstream\"}}\n  {{\"action\":\"reset_zoom\"}}\nand writes one JSON snapshot per message to stdout.\n\n--source overrides `dot_source` from --config. RUST_LOG controls logging on stderr (default info).\n--print-schema prints the JSON schema of host messages and exits."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    source: Option<PathBuf>,
    config: Option<PathBuf>,
    print_schema: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--print-schema" => {
                if options.print_schema {
                    return Err(());
                }
                options.print_schema = true;
            }
            "--source" => {
                if options.source.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.source = Some(PathBuf::from(path));
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config = Some(PathBuf::from(path));
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.source.is_some() {
                    return Err(());
                }
                options.source = Some(PathBuf::from(arg));
            }
        }
    }

    if options.print_schema && (options.source.is_some() || options.config.is_some()) {
        return Err(());
    }

    Ok(options)
}

/// The CLI "mounts" the graph on stdout, which always exists.
struct StdoutSurface;

impl HostSurface for StdoutSurface {
    fn element_exists(&self, element_id: &str) -> bool {
        element_id == ELEMENT_ID
    }
}

fn load_config(options: &CliOptions) -> Result<WidgetConfig, Box<dyn Error>> {
    let mut config = match &options.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };
    if let Some(path) = &options.source {
        config.dot_source = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    }
    Ok(config)
}

/// Forwards stdin lines as requests and prints their snapshots. Always ends with `Dispose`.
async fn forward_stdin(mailbox: mpsc::UnboundedSender<Mail>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let result = async {
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let output = match HostMessage::parse(line).and_then(HostMessage::into_command) {
                Ok(command) => {
                    let (mail, reply) = Mail::request(command);
                    if mailbox.send(mail).is_err() {
                        break;
                    }
                    let Ok(snapshot) = reply.await else {
                        break;
                    };
                    snapshot.to_json_line()?
                }
                Err(err) => {
                    tracing::warn!(error = %err, "host message rejected");
                    serde_json::json!({ "error": err.to_string() }).to_string()
                }
            };

            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<(), std::io::Error>(())
    }
    .await;

    let _ = mailbox.send(Mail::new(Command::Dispose));
    result
}

async fn serve(config: WidgetConfig) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Mail>();
    let engine = HeadlessEngine::new(tx.clone());
    let mut controller = GraphController::new(ELEMENT_ID, config, engine);
    controller.initialize(&StdoutSurface, RetryPolicy::default()).await?;

    let reader = tokio::spawn(forward_stdin(tx));
    controller.run(&mut rx).await;
    reader.await??;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "dotlight".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.print_schema {
            println!("{}", host_message_schema()?);
            return Ok(());
        }

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            ))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        let config = load_config(&options)?;
        tracing::debug!(bytes = config.dot_source.len(), "configuration loaded");

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(serve(config))
    })();

    if let Err(err) = result {
        eprintln!("dotlight: {err}");
        std::process::exit(1);
    }
}
