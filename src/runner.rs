//! Batch pass over the grant collection: find grants with unusable images,
//! pick replacements and write them back one at a time

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::catalog::ImageCatalog;
use crate::client::{ApiError, GrantStore};
use crate::generic::{GenericRules, ImageStatus};
use crate::selector::{self, UsedImages};
use crate::types::{Grant, GrantType, NewGrant};
use crate::utils::osc8_link;

/// Throttling between writes
#[derive(Debug, Clone)]
pub struct Pacing {
    pub delay: Duration,
    pub batch_size: usize,
    pub batch_pause: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            delay: Duration::ZERO,
            batch_size: 0,
            batch_pause: Duration::ZERO,
        }
    }

    /// Pause owed after the `written`-th write. A `batch_size` of zero
    /// turns batch pauses off.
    fn pause_after(&self, written: usize) -> Duration {
        if self.batch_size > 0 && written % self.batch_size == 0 {
            self.batch_pause
        } else {
            self.delay
        }
    }

    fn wait(&self, written: usize) {
        thread::sleep(self.pause_after(written));
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub grant_type: Option<GrantType>,
    /// Reassign every grant, not only generic ones
    pub force: bool,
    /// Also reassign acceptable images already held by a lower id
    pub dedupe: bool,
    /// Select but do not write
    pub dry_run: bool,
    /// Stop after this many grants needing work
    pub limit: Option<usize>,
    pub quiet: bool,
    pub pacing: Pacing,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            grant_type: None,
            force: false,
            dedupe: false,
            dry_run: false,
            limit: None,
            quiet: true,
            pacing: Pacing::none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Planned,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Updated => "updated",
            Outcome::Planned => "planned",
            Outcome::Failed => "failed",
        }
    }
}

/// One decision made during a run
#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub old_url: Option<String>,
    pub new_url: String,
    /// Why the old image was replaced
    pub reason: String,
    /// Where the new image came from
    pub source: String,
    pub outcome: Outcome,
    pub error: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct Summary {
    pub updated_count: usize,
    pub skipped_count: usize,
    pub failed_ids: Vec<i64>,
    pub assignments: Vec<Assignment>,
}

impl Summary {
    pub fn planned_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.outcome == Outcome::Planned)
            .count()
    }
}

/// Why a grant needs a new image, or `None` if it can keep its current one
fn needs_image(
    grant: &Grant,
    rules: &GenericRules,
    options: &RunOptions,
    held: &mut HashSet<String>,
) -> Option<String> {
    let status = rules.classify(grant.current_image());
    if status.is_generic() {
        return Some(status.label().to_string());
    }
    if options.force {
        return Some("forced".to_string());
    }
    // Acceptable here, so current_image is Some
    let url = grant.current_image().unwrap_or_default();
    if !held.insert(url.to_string()) && options.dedupe {
        return Some("duplicate".to_string());
    }
    None
}

/// Run one pass. Grants rejected by `filter` are left alone but their
/// images still count as taken. Fetch errors abort; write errors are
/// recorded in the summary and the pass continues.
pub fn run(
    store: &dyn GrantStore,
    catalog: &ImageCatalog,
    rules: &GenericRules,
    options: &RunOptions,
    filter: Option<&dyn Fn(&Grant) -> bool>,
) -> Result<Summary, ApiError> {
    let mut grants = store.fetch(options.grant_type)?;
    grants.sort_by_key(|g| g.id);
    info!("fetched {} grants", grants.len());

    let mut held = HashSet::new();
    let mut used = UsedImages::new();
    let mut pending: Vec<(&Grant, String)> = Vec::new();
    let mut summary = Summary::default();

    for grant in &grants {
        let wanted = filter.map_or(true, |f| f(grant));
        let reason = if wanted {
            needs_image(grant, rules, options, &mut held)
        } else {
            None
        };
        match reason {
            Some(reason) => pending.push((grant, reason)),
            None => {
                summary.skipped_count += 1;
                if let Some(url) = grant.current_image() {
                    if !rules.is_generic(Some(url)) {
                        used.record(url);
                    }
                }
            }
        }
    }

    if let Some(limit) = options.limit {
        summary.skipped_count += pending.len().saturating_sub(limit);
        pending.truncate(limit);
    }

    info!(
        "{} grants need images, {} already in use",
        pending.len(),
        used.distinct()
    );

    let total = pending.len();
    let mut written = 0;
    for (i, (grant, reason)) in pending.into_iter().enumerate() {
        let selection = selector::select(catalog, grant, &mut used);
        // Brand logos and least-used picks can hand back the image the grant
        // already holds; rewriting it would change nothing
        if grant.current_image() == Some(selection.url.as_str()) {
            debug!("grant {} keeps {}", grant.id, selection.url);
            summary.skipped_count += 1;
            continue;
        }
        let mut assignment = Assignment {
            id: grant.id,
            title: grant.title.clone(),
            old_url: grant.current_image().map(String::from),
            new_url: selection.url.clone(),
            reason,
            source: selection.source.describe(),
            outcome: Outcome::Planned,
            error: None,
        };

        if options.dry_run {
            if !options.quiet {
                println!(
                    "[{}/{}] #{} {}: {} -> {} ({})",
                    i + 1,
                    total,
                    grant.id,
                    grant.title,
                    assignment.old_url.as_deref().unwrap_or("(none)"),
                    osc8_link(&selection.url, &selection.url),
                    assignment.source
                );
            }
            summary.assignments.push(assignment);
            continue;
        }

        if written > 0 {
            options.pacing.wait(written);
        }
        match store.update_image(grant.id, &selection.url) {
            Ok(_) => {
                written += 1;
                summary.updated_count += 1;
                assignment.outcome = Outcome::Updated;
                if !options.quiet {
                    println!(
                        "✓ [{}/{}] #{} {}: {} → {}",
                        i + 1,
                        total,
                        grant.id,
                        grant.title,
                        assignment.old_url.as_deref().unwrap_or("(none)"),
                        osc8_link(&selection.url, &selection.url)
                    );
                }
            }
            Err(e) => {
                written += 1;
                used.release(&selection.url);
                summary.failed_ids.push(grant.id);
                assignment.outcome = Outcome::Failed;
                assignment.error = Some(e.to_string());
                eprintln!("✗ #{} {}: {}", grant.id, grant.title, e);
            }
        }
        debug!("grant {} -> {}", grant.id, selection.url);
        summary.assignments.push(assignment);
    }

    Ok(summary)
}

#[derive(Debug, Default, Clone)]
pub struct SeedSummary {
    pub created: usize,
    pub planned: usize,
    pub failed_titles: Vec<String>,
}

/// Create `records`, giving each one without an acceptable image a fresh
/// pick from the catalog. Images already in the collection count as taken.
pub fn seed(
    store: &dyn GrantStore,
    catalog: &ImageCatalog,
    rules: &GenericRules,
    options: &RunOptions,
    records: Vec<NewGrant>,
) -> Result<SeedSummary, ApiError> {
    let existing = store.fetch_all()?;
    let mut used = UsedImages::new();
    for url in existing.iter().filter_map(Grant::current_image) {
        if !rules.is_generic(Some(url)) {
            used.record(url);
        }
    }

    // Real ids are assigned on creation; number new records after the existing ones
    let next_id = existing.iter().map(|g| g.id).max().unwrap_or(0) + 1;
    let total = records.len();
    let mut summary = SeedSummary::default();
    let mut written = 0;

    for (i, mut record) in records.into_iter().enumerate() {
        if rules.is_generic(record.image_url.as_deref()) {
            let provisional = record.as_grant(next_id + i as i64);
            record.image_url = Some(selector::select_image(catalog, &provisional, &mut used));
        } else if let Some(url) = record.image_url.as_deref() {
            used.record(url);
        }

        if options.dry_run {
            summary.planned += 1;
            if !options.quiet {
                println!(
                    "[{}/{}] {} -> {}",
                    i + 1,
                    total,
                    record.title,
                    record.image_url.as_deref().unwrap_or_default()
                );
            }
            continue;
        }

        if written > 0 {
            options.pacing.wait(written);
        }
        written += 1;
        match store.create_grant(&record) {
            Ok(grant) => {
                summary.created += 1;
                if !options.quiet {
                    println!("✓ [{}/{}] #{} {}", i + 1, total, grant.id, grant.title);
                }
            }
            Err(e) => {
                if let Some(url) = record.image_url.as_deref() {
                    used.release(url);
                }
                eprintln!("✗ {}: {}", record.title, e);
                summary.failed_titles.push(record.title);
            }
        }
    }

    Ok(summary)
}

/// Per-status counts for the `scan` command
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub total: usize,
    pub missing: usize,
    pub placeholder: usize,
    pub svg: usize,
    pub blocked: usize,
    pub duplicate: usize,
    pub acceptable: usize,
    /// (grant id, status) for every grant that would be reassigned
    pub offenders: Vec<(i64, String)>,
}

/// Classify grants without touching them
pub fn scan(grants: &[Grant], rules: &GenericRules) -> ScanReport {
    let mut sorted: Vec<&Grant> = grants.iter().collect();
    sorted.sort_by_key(|g| g.id);

    let mut report = ScanReport {
        total: grants.len(),
        ..ScanReport::default()
    };
    let mut held = HashSet::new();
    for grant in sorted {
        let status = rules.classify(grant.current_image());
        match &status {
            ImageStatus::Missing => report.missing += 1,
            ImageStatus::Placeholder(_) => report.placeholder += 1,
            ImageStatus::Svg => report.svg += 1,
            ImageStatus::Blocked(_) => report.blocked += 1,
            ImageStatus::Acceptable => {
                let url = grant.current_image().unwrap_or_default();
                if held.insert(url.to_string()) {
                    report.acceptable += 1;
                } else {
                    report.duplicate += 1;
                    report.offenders.push((grant.id, "duplicate".to_string()));
                }
                continue;
            }
        }
        report.offenders.push((grant.id, status.describe()));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// In-memory grant collection with per-id write failures
    #[derive(Default)]
    struct MemoryStore {
        grants: RefCell<Vec<Grant>>,
        failing_ids: Vec<i64>,
        fetch_fails: bool,
        writes: Cell<usize>,
    }

    impl MemoryStore {
        fn with(grants: Vec<Grant>) -> Self {
            Self {
                grants: RefCell::new(grants),
                ..Self::default()
            }
        }

        fn image_of(&self, id: i64) -> Option<String> {
            self.grants
                .borrow()
                .iter()
                .find(|g| g.id == id)
                .and_then(|g| g.image_url.clone())
        }
    }

    impl GrantStore for MemoryStore {
        fn fetch_all(&self) -> Result<Vec<Grant>, ApiError> {
            if self.fetch_fails {
                return Err(ApiError::Fetch {
                    url: "memory:/api/grants".to_string(),
                    reason: "HTTP 503".to_string(),
                });
            }
            Ok(self.grants.borrow().clone())
        }

        fn fetch_by_type(&self, grant_type: GrantType) -> Result<Vec<Grant>, ApiError> {
            Ok(self
                .fetch_all()?
                .into_iter()
                .filter(|g| g.grant_type == Some(grant_type))
                .collect())
        }

        fn search(&self, query: &str) -> Result<Vec<Grant>, ApiError> {
            let query = query.to_lowercase();
            Ok(self
                .fetch_all()?
                .into_iter()
                .filter(|g| g.title.to_lowercase().contains(&query))
                .collect())
        }

        fn update_image(&self, id: i64, image_url: &str) -> Result<Grant, ApiError> {
            self.writes.set(self.writes.get() + 1);
            if self.failing_ids.contains(&id) {
                return Err(ApiError::Update {
                    id,
                    reason: "HTTP 500".to_string(),
                });
            }
            let mut grants = self.grants.borrow_mut();
            let grant = grants
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or_else(|| ApiError::Update {
                    id,
                    reason: "HTTP 404".to_string(),
                })?;
            grant.image_url = Some(image_url.to_string());
            Ok(grant.clone())
        }

        fn create_grant(&self, new_grant: &NewGrant) -> Result<Grant, ApiError> {
            let mut grants = self.grants.borrow_mut();
            let id = grants.iter().map(|g| g.id).max().unwrap_or(0) + 1;
            let grant = new_grant.as_grant(id);
            grants.push(grant.clone());
            Ok(grant)
        }
    }

    fn grant(id: i64, industry: &str, image: Option<&str>) -> Grant {
        Grant {
            id,
            title: format!("Program {}", id),
            industry: Some(industry.to_string()),
            grant_type: Some(GrantType::Federal),
            image_url: image.map(String::from),
            ..Grant::default()
        }
    }

    const GOOD: &str = "https://images.unsplash.com/photo-1400000000000-aaaaaaaaaaaa?w=800";

    fn run_default(store: &MemoryStore) -> Summary {
        run(
            store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &RunOptions::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_only_generic_images_are_replaced() {
        let store = MemoryStore::with(vec![
            grant(1, "Technology", None),
            grant(2, "Technology", Some(GOOD)),
            grant(3, "Technology", Some("https://cdn.example.com/placeholder.png")),
            grant(4, "Technology", Some("https://www.canada.ca/logo.svg")),
        ]);
        let summary = run_default(&store);

        assert_eq!(summary.updated_count, 3);
        assert_eq!(summary.skipped_count, 1);
        assert!(summary.failed_ids.is_empty());
        assert_eq!(store.image_of(2).as_deref(), Some(GOOD));

        let rules = GenericRules::default();
        let technology = ImageCatalog::builtin().lookup("technology");
        for id in [1, 3, 4] {
            let image = store.image_of(id).unwrap();
            assert!(!rules.is_generic(Some(&image)));
            assert!(technology.contains(&image.as_str()));
        }
    }

    #[test]
    fn test_existing_images_are_not_reused() {
        let technology = ImageCatalog::builtin().lookup("technology");
        let mut grants = vec![grant(1, "Technology", None)];
        for (i, url) in technology.iter().skip(1).enumerate() {
            grants.push(grant(10 + i as i64, "Technology", Some(url)));
        }
        let store = MemoryStore::with(grants);
        run_default(&store);
        assert_eq!(store.image_of(1).as_deref(), Some(technology[0]));
    }

    #[test]
    fn test_second_run_updates_nothing() {
        let store = MemoryStore::with(vec![
            grant(1, "Agriculture", None),
            grant(2, "Agriculture", Some("")),
            grant(3, "Tourism", Some("https://example.com/default.jpg")),
            grant(4, "Unknown", None),
        ]);
        let first = run_default(&store);
        assert_eq!(first.updated_count, 4);

        let second = run_default(&store);
        assert_eq!(second.updated_count, 0);
        assert_eq!(second.skipped_count, 4);
        assert_eq!(store.writes.get(), 4);
    }

    #[test]
    fn test_failed_update_does_not_stop_run() {
        let store = MemoryStore {
            failing_ids: vec![2],
            ..MemoryStore::with(vec![
                grant(1, "Energy", None),
                grant(2, "Energy", None),
                grant(3, "Energy", None),
            ])
        };
        let summary = run_default(&store);
        assert_eq!(summary.updated_count, 2);
        assert_eq!(summary.failed_ids, vec![2]);
        assert!(store.image_of(2).is_none());
        assert!(store.image_of(3).is_some());

        let failed = &summary.assignments[1];
        assert_eq!(failed.outcome, Outcome::Failed);
        assert!(failed.error.as_deref().unwrap_or("").contains("HTTP 500"));
    }

    #[test]
    fn test_fetch_error_aborts() {
        let store = MemoryStore {
            fetch_fails: true,
            ..MemoryStore::default()
        };
        let result = run(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &RunOptions::default(),
            None,
        );
        assert!(matches!(result, Err(ApiError::Fetch { .. })));
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let store = MemoryStore::with(vec![grant(1, "Mining", None), grant(2, "Mining", None)]);
        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };
        let summary = run(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &options,
            None,
        )
        .unwrap();
        assert_eq!(summary.updated_count, 0);
        assert_eq!(summary.planned_count(), 2);
        assert_ne!(summary.assignments[0].new_url, summary.assignments[1].new_url);
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_dedupe_reassigns_later_holder() {
        let store = MemoryStore::with(vec![
            grant(1, "Forestry", Some(GOOD)),
            grant(2, "Forestry", Some(GOOD)),
        ]);
        let plain = run_default(&store);
        assert_eq!(plain.updated_count, 0);

        let options = RunOptions {
            dedupe: true,
            ..RunOptions::default()
        };
        let summary = run(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &options,
            None,
        )
        .unwrap();
        assert_eq!(summary.updated_count, 1);
        assert_eq!(summary.assignments[0].id, 2);
        assert_eq!(summary.assignments[0].reason, "duplicate");
        assert_eq!(store.image_of(1).as_deref(), Some(GOOD));
        assert_ne!(store.image_of(2).as_deref(), Some(GOOD));
    }

    #[test]
    fn test_filter_and_type() {
        let mut private = grant(3, "Housing", None);
        private.grant_type = Some(GrantType::Private);
        let store = MemoryStore::with(vec![grant(1, "Housing", None), grant(2, "Housing", None), private]);

        let options = RunOptions {
            grant_type: Some(GrantType::Federal),
            ..RunOptions::default()
        };
        let only_odd = |g: &Grant| g.id % 2 == 1;
        let summary = run(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &options,
            Some(&only_odd),
        )
        .unwrap();
        assert_eq!(summary.updated_count, 1);
        assert_eq!(summary.skipped_count, 1);
        assert!(store.image_of(1).is_some());
        assert!(store.image_of(2).is_none());
        assert!(store.image_of(3).is_none());
    }

    #[test]
    fn test_limit() {
        let store = MemoryStore::with((1..=5).map(|id| grant(id, "Rural", None)).collect());
        let options = RunOptions {
            limit: Some(2),
            ..RunOptions::default()
        };
        let summary = run(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &options,
            None,
        )
        .unwrap();
        assert_eq!(summary.updated_count, 2);
        assert_eq!(summary.skipped_count, 3);
    }

    #[test]
    fn test_dedupe_keeps_shared_brand_logo() {
        const TELUS: &str = "https://logo.clearbit.com/telus.com";
        let store = MemoryStore::with(vec![
            Grant {
                title: "TELUS Fund 1".to_string(),
                ..grant(1, "Media", Some(TELUS))
            },
            Grant {
                title: "TELUS Fund 2".to_string(),
                ..grant(2, "Media", Some(TELUS))
            },
        ]);
        let options = RunOptions {
            dedupe: true,
            ..RunOptions::default()
        };
        for _ in 0..3 {
            let summary = run(
                &store,
                &ImageCatalog::builtin(),
                &GenericRules::default(),
                &options,
                None,
            )
            .unwrap();
            assert_eq!(summary.updated_count, 0);
            assert_eq!(summary.skipped_count, 2);
            assert!(summary.assignments.is_empty());
        }
        assert_eq!(store.writes.get(), 0);
        assert_eq!(store.image_of(2).as_deref(), Some(TELUS));
    }

    #[test]
    fn test_pause_after_batches() {
        let pacing = Pacing {
            delay: Duration::from_millis(100),
            batch_size: 10,
            batch_pause: Duration::from_millis(1000),
        };
        for written in 1..10 {
            assert_eq!(pacing.pause_after(written), Duration::from_millis(100));
        }
        assert_eq!(pacing.pause_after(10), Duration::from_millis(1000));
        assert_eq!(pacing.pause_after(11), Duration::from_millis(100));
        assert_eq!(pacing.pause_after(20), Duration::from_millis(1000));

        let unbatched = Pacing {
            batch_size: 0,
            ..pacing
        };
        for written in 1..=20 {
            assert_eq!(unbatched.pause_after(written), Duration::from_millis(100));
        }
        assert_eq!(Pacing::none().pause_after(5), Duration::ZERO);
    }

    fn new_grant(title: &str, industry: &str, image: Option<&str>) -> NewGrant {
        NewGrant {
            title: title.to_string(),
            description: String::new(),
            grant_type: GrantType::Provincial,
            industry: Some(industry.to_string()),
            category: None,
            province: None,
            funding_organization: None,
            funding_amount: None,
            eligibility_criteria: Vec::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            documents: Vec::new(),
            image_url: image.map(String::from),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_seed_assigns_unused_images() {
        let fisheries = ImageCatalog::builtin().lookup("fisheries");
        let store = MemoryStore::with(vec![grant(1, "Fisheries", Some(fisheries[0]))]);
        let records = vec![
            new_grant("Coastal Fund", "Fisheries", None),
            new_grant("Harbour Fund", "Fisheries", Some("https://example.com/placeholder.png")),
            new_grant("Own Photo", "Fisheries", Some(GOOD)),
        ];
        let summary = seed(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &RunOptions::default(),
            records,
        )
        .unwrap();
        assert_eq!(summary.created, 3);

        let images: Vec<String> = (2..=4).filter_map(|id| store.image_of(id)).collect();
        assert_eq!(images.len(), 3);
        assert_ne!(images[0], fisheries[0]);
        assert_ne!(images[1], fisheries[0]);
        assert_ne!(images[0], images[1]);
        assert!(fisheries.contains(&images[0].as_str()));
        assert_eq!(images[2], GOOD);
    }

    #[test]
    fn test_seed_dry_run_creates_nothing() {
        let store = MemoryStore::default();
        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };
        let summary = seed(
            &store,
            &ImageCatalog::builtin(),
            &GenericRules::default(),
            &options,
            vec![new_grant("Coastal Fund", "Fisheries", None)],
        )
        .unwrap();
        assert_eq!(summary.planned, 1);
        assert_eq!(summary.created, 0);
        assert!(store.grants.borrow().is_empty());
    }

    #[test]
    fn test_scan_counts() {
        let grants = vec![
            grant(1, "x", None),
            grant(2, "x", Some("https://example.com/placeholder.jpg")),
            grant(3, "x", Some("https://example.com/logo.svg")),
            grant(
                4,
                "x",
                Some("https://images.unsplash.com/photo-1568232961385-de49add58b50?w=800"),
            ),
            grant(5, "x", Some(GOOD)),
            grant(6, "x", Some(GOOD)),
        ];
        let report = scan(&grants, &GenericRules::default());
        assert_eq!(report.total, 6);
        assert_eq!(report.missing, 1);
        assert_eq!(report.placeholder, 1);
        assert_eq!(report.svg, 1);
        assert_eq!(report.blocked, 1);
        assert_eq!(report.acceptable, 1);
        assert_eq!(report.duplicate, 1);
        assert_eq!(report.offenders.last(), Some(&(6, "duplicate".to_string())));
    }
}
