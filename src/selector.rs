//! Picks one image per grant from the catalog, avoiding repeats within a run
//!
//! Priority, first hit wins:
//! 1. a recognized funding organization gets its brand image, even if it is
//!    already in use
//! 2. candidates from the grant's category/industry, its province, and any
//!    catalog keyword or province name found in the title or description
//! 3. the grant type's images and the generic fallback list when fewer than
//!    two candidates were gathered
//!
//! Among the candidates not yet used in this run, the one at
//! `grant.id mod len` is chosen. When every candidate is taken, the least
//! used one is reused.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::catalog::ImageCatalog;
use crate::types::Grant;

/// Images handed out during one run
#[derive(Debug, Default, Clone)]
pub struct UsedImages {
    used: HashSet<String>,
    counts: HashMap<String, usize>,
}

impl UsedImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.used.contains(url)
    }

    /// Count one more grant holding `url`
    pub fn record(&mut self, url: &str) {
        self.used.insert(url.to_string());
        *self.counts.entry(url.to_string()).or_insert(0) += 1;
    }

    /// Undo one `record`, e.g. after the write carrying it failed
    pub fn release(&mut self, url: &str) {
        if let Some(count) = self.counts.get_mut(url) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(url);
                self.used.remove(url);
            }
        }
    }

    pub fn count(&self, url: &str) -> usize {
        self.counts.get(url).copied().unwrap_or(0)
    }

    /// Number of distinct images in use
    pub fn distinct(&self) -> usize {
        self.used.len()
    }
}

/// Where a selected image came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSource {
    Brand(&'static str),
    /// Fresh pick from the pool; lists the tags that contributed to it
    Pool(Vec<String>),
    /// Every candidate was taken; reused the least used one
    LeastUsed(Vec<String>),
}

impl MatchSource {
    pub fn describe(&self) -> String {
        match self {
            MatchSource::Brand(name) => format!("brand:{}", name),
            MatchSource::Pool(tags) => format!("pool:{}", tags.join("+")),
            MatchSource::LeastUsed(tags) => format!("least-used:{}", tags.join("+")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub url: String,
    pub source: MatchSource,
}

/// Choose an image for `grant` and record it in `used`
pub fn select(catalog: &ImageCatalog, grant: &Grant, used: &mut UsedImages) -> Selection {
    if let Some(brand) = grant
        .organization_names()
        .find_map(|name| catalog.brand_in(name))
    {
        debug!("grant {}: brand match {}", grant.id, brand.name);
        used.record(brand.image);
        return Selection {
            url: brand.image.to_string(),
            source: MatchSource::Brand(brand.name),
        };
    }

    let mut pool = CandidatePool::default();

    for field in [grant.category.as_deref(), grant.industry.as_deref()]
        .into_iter()
        .flatten()
    {
        if let Some(entry) = catalog.category(field) {
            pool.extend(entry.tag, entry.images);
        }
    }

    if let Some(province) = grant.province.as_deref() {
        if let Some(images) = catalog.province(province) {
            pool.extend(province.trim(), images);
        }
    }

    let text = format!("{} {}", grant.title, grant.description);
    for entry in catalog.keyword_matches(&text) {
        pool.extend(entry.tag, entry.images);
    }
    for entry in catalog.province_mentions(&text) {
        pool.extend(entry.name, entry.images);
    }

    if pool.urls.len() < 2 {
        if let Some(grant_type) = grant.grant_type {
            pool.extend(grant_type.as_str(), catalog.type_images(grant_type));
        }
        pool.extend("fallback", catalog.fallback());
    }

    let selection = pool.pick(grant.id, used);
    debug!(
        "grant {}: {} from {} candidates",
        grant.id,
        selection.source.describe(),
        pool.urls.len()
    );
    used.record(&selection.url);
    selection
}

/// Convenience wrapper returning only the URL
pub fn select_image(catalog: &ImageCatalog, grant: &Grant, used: &mut UsedImages) -> String {
    select(catalog, grant, used).url
}

/// Ordered, de-duplicated candidate URLs and the tags that supplied them
#[derive(Debug, Default)]
struct CandidatePool {
    urls: Vec<&'static str>,
    tags: Vec<String>,
}

impl CandidatePool {
    fn extend(&mut self, tag: &str, images: &[&'static str]) {
        if images.is_empty() {
            return;
        }
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
        for &url in images {
            if !self.urls.contains(&url) {
                self.urls.push(url);
            }
        }
    }

    fn pick(&self, id: i64, used: &UsedImages) -> Selection {
        let fresh: Vec<&str> = self
            .urls
            .iter()
            .copied()
            .filter(|url| !used.contains(url))
            .collect();

        if !fresh.is_empty() {
            let index = id.rem_euclid(fresh.len() as i64) as usize;
            return Selection {
                url: fresh[index].to_string(),
                source: MatchSource::Pool(self.tags.clone()),
            };
        }

        // min_by_key keeps the first of equal counts, so ties go to catalog order
        let url = self
            .urls
            .iter()
            .copied()
            .min_by_key(|url| used.count(url))
            .unwrap_or_default();
        Selection {
            url: url.to_string(),
            source: MatchSource::LeastUsed(self.tags.clone()),
        }
    }
}
