use crate::infra::{InMemoryTrainingStore, LoggingAlertDispatcher};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use safetrack::clock::{Clock, SystemClock};
use safetrack::error::AppError;
use safetrack::trainings::alerts::AlertService;
use safetrack::trainings::domain::StatusFilter;
use safetrack::trainings::roster::{import_roster, RosterService};
use std::io::Cursor;
use std::sync::Arc;

const SAMPLE_ROSTER: &str = "\
Name,Role,Training,Completed On,Expires On
Ana Paula,Técnico de Segurança,Trabalho em Altura,2025-04-02,2026-04-02
Ana Paula,Técnico de Segurança,SEP,2025-09-15,2026-09-15
Carlos Alberto,Motorista,Direção Defensiva,2025-02-20,2026-02-20
Carlos Mendes,Soldador industrial,Trabalho a Quente,2025-08-30,2026-08-30
Carlos Mendes,Soldador industrial,ASO,,
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Classify against this day instead of the current calendar day
    #[arg(long)]
    today: Option<NaiveDate>,
}

/// Clock pinned to a chosen calendar day so the demo output is reproducible.
#[derive(Clone, Copy)]
struct PinnedClock {
    today: NaiveDate,
}

impl Clock for PinnedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
            .and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| SystemClock.today());
    let clock = PinnedClock { today };

    let store = Arc::new(InMemoryTrainingStore::default());
    let roster = RosterService::new(store.clone(), clock);
    let alerts = AlertService::new(store, Arc::new(LoggingAlertDispatcher), clock);

    let employees = import_roster(Cursor::new(SAMPLE_ROSTER))
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?;
    let synced = roster.sync(employees)?;

    let overview = roster.overview(StatusFilter::All, "", None, None);
    println!("Safetrack demo: {} employees synced, today = {today}", synced);
    println!(
        "Totals: {} trainings ({} válidos, {} a vencer, {} vencidos)",
        overview.statistics.total,
        overview.statistics.valid,
        overview.statistics.expiring,
        overview.statistics.expired,
    );

    for employee in &overview.employees {
        println!(
            "  {} ({}): {}",
            employee.name,
            if employee.role.is_empty() { "sem função" } else { &employee.role },
            employee.worst_status_label,
        );
        for training in &employee.trainings {
            println!("      {} - {}", training.name, training.status_label);
        }
    }

    let pending = alerts.alerts_to_send();
    println!("Alert candidates: {}", pending.len());
    for alert in &pending {
        println!(
            "  [{}] {} - {} ({} dias)",
            alert.status.label(),
            alert.employee_name,
            alert.training_name,
            alert.days_remaining,
        );
    }

    Ok(())
}
