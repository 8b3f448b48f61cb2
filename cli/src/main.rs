use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use flow_core::{
    format_duration, patient_detail, summarize_board, BoardSnapshot, FlowConfig, PatientDetail,
};
use flow_feed::{FileSource, PatientSource, Poller};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "flow-cli",
    about = "Bảng theo dõi luồng bệnh nhân từ snapshot JSON."
)]
struct Cli {
    /// Mức log (ví dụ: info, debug, flow_feed=debug).
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// In bảng kanban theo giai đoạn.
    Board(SnapshotArgs),
    /// In timeline và thống kê thời gian của một bệnh nhân.
    Detail {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Mã bệnh nhân.
        #[arg(short, long)]
        patient: String,
    },
    /// Đọc lại file theo chu kỳ và in số bệnh nhân mỗi cột.
    Watch {
        /// Đường dẫn tới file JSON `{ "patients": [...] }`.
        #[arg(short, long)]
        input: PathBuf,
        /// Chu kỳ làm mới (ms).
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Số lần đọc trước khi dừng (mặc định chạy mãi).
        #[arg(long)]
        ticks: Option<usize>,
        /// Bỏ snapshot cũ sau số lần lỗi liên tiếp này (0 = giữ mãi).
        #[arg(long)]
        max_failures: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// Đường dẫn tới file JSON `{ "patients": [...] }`.
    #[arg(short, long)]
    input: PathBuf,
    /// Thời điểm tính toán (RFC 3339), mặc định là hiện tại.
    #[arg(long)]
    now: Option<String>,
    /// Xuất JSON thay vì văn bản.
    #[arg(long)]
    json: bool,
}

impl SnapshotArgs {
    fn now(&self) -> anyhow::Result<DateTime<Utc>> {
        match &self.now {
            Some(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .with_context(|| format!("Mốc thời gian không hợp lệ: {text}")),
            None => Ok(Utc::now()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_level.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Board(args) => {
            let now = args.now()?;
            let patients = FileSource::new(&args.input)
                .fetch()
                .with_context(|| format!("Không đọc được file {:?}", args.input))?;
            let board = summarize_board(&patients, now);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                print_board(&board);
            }
        }
        Command::Detail { snapshot, patient } => {
            let now = snapshot.now()?;
            let patients = FileSource::new(&snapshot.input)
                .fetch()
                .with_context(|| format!("Không đọc được file {:?}", snapshot.input))?;
            let detail = patient_detail(&patients, &patient, now)?;

            if snapshot.json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_detail(&detail);
            }
        }
        Command::Watch {
            input,
            interval_ms,
            ticks,
            max_failures,
        } => {
            let mut config = FlowConfig::default();
            if let Some(interval) = interval_ms {
                config.poll_interval_ms = interval;
            }
            if let Some(limit) = max_failures {
                config.max_retained_failures = limit;
            }

            info!(path = ?input, interval_ms = config.poll_interval_ms, "watching snapshot");
            let mut poller = Poller::new(FileSource::new(input), config);
            poller.run(ticks, |patients| {
                let board = summarize_board(patients, Utc::now());
                let counts: Vec<String> = board
                    .columns
                    .iter()
                    .map(|column| format!("{}: {}", column.label, column.cards.len()))
                    .collect();
                println!("[{}] {}", board.generated_at.format("%H:%M:%S"), counts.join(" | "));
            });
        }
    }

    Ok(())
}

fn print_board(board: &BoardSnapshot) {
    println!(
        "Generated at: {}\nPatients: {}",
        board.generated_at,
        board.total_patients()
    );

    for column in &board.columns {
        println!(
            "\n== {} [{}] ({})",
            column.label,
            column.stage.as_str(),
            column.cards.len()
        );
        for card in &column.cards {
            let alert = if card.has_alert { " [!]" } else { "" };
            println!(
                "  {:<8} {:<24} {:?}  {}  studies {}/{}{}",
                card.patient_id,
                card.name,
                card.severity,
                card.time_in_stage,
                card.studies_completed,
                card.studies_pending + card.studies_completed,
                alert
            );
        }
    }
}

fn print_detail(detail: &PatientDetail) {
    let minutes = detail
        .minutes_in_stage
        .map(format_duration)
        .unwrap_or_else(|| "--".to_string());
    println!(
        "{} ({}) - {}\nStage: {} for {}",
        detail.patient.name,
        detail.patient.id,
        detail.patient.diagnosis,
        detail.stage.label(),
        minutes
    );

    println!("\nTimeline:");
    for event in &detail.timeline {
        println!(
            "  {}  +{:<8} {} - {}",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            format_duration(event.duration_minutes),
            event.title,
            event.description
        );
    }

    let stats = &detail.stats;
    println!(
        "\nTotal time: {}\nWaiting for studies: {}\nWaiting for review: {}\nStudies in progress: {}\nAverage study time: {}",
        format_duration(stats.total_time),
        format_duration(stats.waiting_for_studies),
        format_duration(stats.waiting_for_review),
        format_duration(stats.studies_in_progress),
        format_duration(stats.average_study_time)
    );
}
