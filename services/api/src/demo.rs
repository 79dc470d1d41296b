use crate::infra::{
    seed_demo_trainers, InMemoryNoticeMailer, InMemoryPayoutRepository, InMemoryTrainerRepository,
};
use backoffice::error::AppError;
use backoffice::workflows::access::OperatorId;
use backoffice::workflows::payouts::{
    statement_to_string, CompletePayout, NewPayout, PayoutService,
};
use backoffice::workflows::trainers::{
    ComplianceDocument, NoticeCatalog, TrainerComplianceService, TrainerId, VerificationUpdate,
};
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Portal base URL embedded in the demo notices
    #[arg(long, default_value = "https://portal.example.com")]
    pub(crate) portal_url: String,
    /// Payout amount used in the demo lifecycle
    #[arg(long, default_value = "150.00")]
    pub(crate) amount: Decimal,
    /// Skip the payout portion of the demo
    #[arg(long)]
    pub(crate) skip_payouts: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatementArgs {
    /// Trainer whose demo ledger is rendered
    #[arg(long, default_value_t = 42)]
    pub(crate) trainer_id: i64,
    /// Write the CSV here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        portal_url,
        amount,
        skip_payouts,
    } = args;
    let operator = OperatorId(1);

    println!("Back-office workflow demo");

    let trainers = Arc::new(InMemoryTrainerRepository::default());
    seed_demo_trainers(&trainers);
    let mailer = Arc::new(InMemoryNoticeMailer::default());
    let compliance = TrainerComplianceService::new(
        trainers,
        mailer.clone(),
        NoticeCatalog::standard(portal_url),
    );

    println!("\nCompliance requests");
    match compliance.request_document(TrainerId(42), ComplianceDocument::W9, operator) {
        Ok(receipt) => println!("- {}", receipt.confirmation()),
        Err(err) => println!("- W-9 request failed: {err}"),
    }
    match compliance.request_document(TrainerId(42), ComplianceDocument::BackgroundCheck, operator)
    {
        Ok(receipt) => println!(
            "- {} (no timestamp column for background checks)",
            receipt.confirmation()
        ),
        Err(err) => println!("- background request failed: {err}"),
    }
    match compliance.request_document(TrainerId(13), ComplianceDocument::Safesport, operator) {
        Ok(receipt) => println!("- {}", receipt.confirmation()),
        Err(err) => println!("- SafeSport request for trainer 13 rejected: {err}"),
    }

    println!("\nVerification");
    match compliance.mark_verified(
        TrainerId(42),
        VerificationUpdate {
            verified: true,
            safesport: true,
            w9: true,
            background: true,
            actor: operator,
        },
    ) {
        Ok(view) => match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("Trainer 42 compliance state:\n{json}"),
            Err(err) => println!("compliance state unavailable: {err}"),
        },
        Err(err) => println!("verification failed: {err}"),
    }

    match compliance.outstanding(10) {
        Ok(views) => {
            println!("\nStill awaiting verification: {}", views.len());
            for view in views {
                println!("- trainer {}", view.trainer_id.0);
            }
        }
        Err(err) => println!("outstanding listing unavailable: {err}"),
    }

    let notices = mailer.sent();
    if notices.is_empty() {
        println!("\nNotices dispatched: none");
    } else {
        println!("\nNotices dispatched");
        for notice in notices {
            println!("- {} <- \"{}\"", notice.recipient, notice.subject);
        }
    }

    if skip_payouts {
        return Ok(());
    }

    println!("\nPayout lifecycle");
    let payouts = PayoutService::new(Arc::new(InMemoryPayoutRepository::default()));
    let created = match payouts.create(NewPayout {
        trainer_id: TrainerId(42),
        amount,
        method: "bank_transfer".to_string(),
        actor: operator,
    }) {
        Ok(view) => view,
        Err(err) => {
            println!("payout creation rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Scheduled payout {} for trainer {}: {} via {} ({})",
        created.payout_id.0, created.trainer_id.0, created.amount, created.method, created.status
    );

    match payouts.complete(
        created.payout_id,
        CompletePayout {
            transaction_id: "ch_demo_001".to_string(),
            actor: operator,
        },
    ) {
        Ok(view) => println!(
            "- Completed payout {} with transaction {}",
            view.payout_id.0,
            view.transaction_id.as_deref().unwrap_or("-")
        ),
        Err(err) => println!("payout completion failed: {err}"),
    }

    match payouts.statement(TrainerId(42)) {
        Ok(records) => {
            let csv = statement_to_string(&records)?;
            println!("\nStatement for trainer 42:\n{csv}");
        }
        Err(err) => println!("statement unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn run_payout_statement(args: StatementArgs) -> Result<(), AppError> {
    let StatementArgs { trainer_id, output } = args;
    let operator = OperatorId(1);

    let payouts = PayoutService::new(Arc::new(InMemoryPayoutRepository::default()));
    let seeds = [
        (Decimal::new(15000, 2), "bank_transfer"),
        (Decimal::new(7550, 2), "bank_transfer"),
        (Decimal::new(20000, 2), "manual"),
    ];
    let mut first_id = None;
    for (amount, method) in seeds {
        match payouts.create(NewPayout {
            trainer_id: TrainerId(trainer_id),
            amount,
            method: method.to_string(),
            actor: operator,
        }) {
            Ok(view) => {
                first_id.get_or_insert(view.payout_id);
            }
            Err(err) => {
                println!("demo ledger seeding failed: {err}");
                return Ok(());
            }
        }
    }
    if let Some(payout_id) = first_id {
        if let Err(err) = payouts.complete(
            payout_id,
            CompletePayout {
                transaction_id: "ch_demo_001".to_string(),
                actor: operator,
            },
        ) {
            println!("demo ledger completion failed: {err}");
        }
    }

    let records = match payouts.statement(TrainerId(trainer_id)) {
        Ok(records) => records,
        Err(err) => {
            println!("statement unavailable: {err}");
            return Ok(());
        }
    };
    let csv = statement_to_string(&records)?;

    match output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            println!("Statement written to {}", path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}
