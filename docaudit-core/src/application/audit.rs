// docaudit-core/src/application/audit.rs

use chrono::{NaiveDate, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::domain::activity::ActivityLog;
use crate::domain::document::Document;
use crate::domain::finding::Check;
use crate::domain::index::ContextIndexBuilder;
use crate::domain::policy::{DefaultPolicy, PolicyResolver};
use crate::domain::report::{AuditReport, SeverityAggregator};
use crate::domain::validators::{DocumentVerdict, RunFlags, ValidationContext, validate_document};
use crate::error::AuditError;
use crate::infrastructure::activity_log::{ACTIVITY_LOG_DIR, load_activity};
use crate::infrastructure::config::{POLICY_FILE, load_policy};
use crate::infrastructure::discovery::{
    DiscoveryOptions, OnlyFilter, discover_documents, display_path,
};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::write_json;
use crate::infrastructure::parser::ParserKind;
use crate::ports::StructuredTextParser;

pub const DOCS_DIR: &str = "docs";
pub const REPORT_FILE: &str = "docs_audit_report.json";
pub const INDEX_FILE: &str = "context_index.json";

/// Everything one audit run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub root: PathBuf,
    /// Defaults to `<root>/docs/docs_audit_report.json`.
    pub report_path: Option<PathBuf>,
    /// Defaults to `<root>/docs/docs_audit.config.yaml`.
    pub config_path: Option<PathBuf>,
    pub only: Option<String>,
    pub since: Option<NaiveDate>,
    pub flags: RunFlags,
    pub build_index: bool,
    pub today: NaiveDate,
    pub parser: ParserKind,
}

impl AuditOptions {
    pub fn new(root: impl Into<PathBuf>, today: NaiveDate) -> Self {
        Self {
            root: root.into(),
            report_path: None,
            config_path: None,
            only: None,
            since: None,
            flags: RunFlags::default(),
            build_index: true,
            today,
            parser: ParserKind::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub report_path: PathBuf,
    pub index_path: Option<PathBuf>,
}

/// Runs the whole audit: policy, discovery, per-document validation, index and report.
///
/// Configuration problems are returned before any document is read. Per-document problems
/// only ever become findings.
#[instrument(skip(options), fields(root = %options.root.display()))]
pub fn run_audit(options: &AuditOptions) -> Result<AuditOutcome, AuditError> {
    let root = fs::canonicalize(&options.root).map_err(|e| {
        InfrastructureError::ConfigError(format!(
            "audit root '{}' is not accessible: {}",
            options.root.display(),
            e
        ))
    })?;
    let docs_dir = root.join(DOCS_DIR);
    let parser = options.parser.build();

    // 1. Chargement de la politique (fatal en cas d'erreur)
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| docs_dir.join(POLICY_FILE));
    let policy = load_policy(&config_path, parser.as_ref())?;
    let resolver = PolicyResolver::new(policy, DefaultPolicy::v1())?;
    debug!(defaults = resolver.defaults_version(), "Policy resolver ready");

    let discovery = DiscoveryOptions {
        only: options.only.as_deref().map(OnlyFilter::new).transpose()?,
        since: options.since,
    };

    // 2. Journaux d'activité IA (uniquement avec --check-ai-logs)
    let activity = if options.flags.check_ai_logs {
        load_activity(&root.join(ACTIVITY_LOG_DIR), "")?
    } else {
        ActivityLog::default()
    };

    let ctx = ValidationContext {
        resolver: &resolver,
        flags: options.flags,
        activity: &activity,
        today: options.today,
        root: &root,
    };

    // 3. Scan des documents
    let mut aggregator = SeverityAggregator::new();
    let mut index = ContextIndexBuilder::default();

    for path in discover_documents(&root, &docs_dir, &discovery) {
        let shown = display_path(&root, &path);
        let (doc, verdict) = audit_document(path, shown, parser.as_ref(), &ctx);
        index.push(&doc);
        aggregator.record(verdict);
    }
    info!(files = index.len(), status = %aggregator.status(), "Scan complete");

    // 4. Rapport (toujours écrit avant le code de sortie)
    let report = aggregator.finish();
    let report_path = options
        .report_path
        .clone()
        .unwrap_or_else(|| docs_dir.join(REPORT_FILE));
    write_json(&report_path, &report)?;
    debug!(path = %report_path.display(), "Report written");

    // 5. Index de contexte (best effort, ne bloque jamais le rapport)
    let index_path = if options.build_index {
        let path = docs_dir.join(INDEX_FILE);
        let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        match write_json(&path, &index.finish(generated)) {
            Ok(()) => {
                debug!(path = %path.display(), "Context index written");
                Some(path)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Context index not written");
                None
            }
        }
    } else {
        None
    };

    Ok(AuditOutcome {
        report,
        report_path,
        index_path,
    })
}

fn audit_document(
    path: PathBuf,
    shown: String,
    parser: &dyn StructuredTextParser,
    ctx: &ValidationContext<'_>,
) -> (Document, DocumentVerdict) {
    match read_lossy(&path) {
        Ok(text) => {
            let doc = Document::parse(path, shown, &text, parser);
            let verdict = validate_document(&doc, ctx);
            (doc, verdict)
        }
        Err(e) => {
            warn!(path = %shown, error = %e, "Document unreadable");
            let doc = Document::parse(path, shown, "", parser);
            let message = format!("unreadable document ({})", e);
            let finding = ctx.finding(&doc, Check::Unreadable, message);
            let verdict = DocumentVerdict {
                findings: vec![finding],
                stale: None,
            };
            (doc, verdict)
        }
    }
}

/// Invalid UTF-8 sequences are replaced rather than rejected.
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
