use app_state::DEFAULT_TOP_N;
use common_types::AnalysisResult;
use tracing::debug;

/// Rank-ordered analysis results plus the "top N" cutoff.
/// Inclusion is always the first `top_n` entries by position.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    results: Vec<AnalysisResult>,
    top_n: Option<usize>,
    /// Last cutoff chosen by the user, or the default.
    preferred_top_n: usize,
}

/// One row of the ranked view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    /// 1-based.
    pub rank: usize,
    pub similarity: f64,
    pub result: &'a AnalysisResult,
    pub included: bool,
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl ResultSet {
    #[must_use]
    pub fn new(default_top_n: usize) -> Self {
        Self {
            results: Vec::new(),
            top_n: None,
            preferred_top_n: default_top_n.max(1),
        }
    }

    /// Replace the working set. Entries with no similarity are dropped, order is kept.
    pub fn load(&mut self, results: Vec<AnalysisResult>) {
        let received = results.len();
        self.results = results
            .into_iter()
            .filter(|r| r.similarity() > 0.0)
            .collect();
        self.top_n = (!self.results.is_empty())
            .then(|| self.preferred_top_n.min(self.results.len()));
        debug!(
            "Loaded {} of {received} results, top_n = {:?}",
            self.results.len(),
            self.top_n
        );
    }

    /// Clamp into `[1, len]`. No-op on an empty set.
    pub fn set_top_n(&mut self, n: usize) {
        if self.results.is_empty() {
            return;
        }
        let clamped = n.clamp(1, self.results.len());
        self.top_n = Some(clamped);
        self.preferred_top_n = clamped;
    }

    /// Free-text cutoff entry. Reads the leading digits (`"5abc"` is 5, `"3.7"` is 3);
    /// no digits or a negative number means 1.
    pub fn set_top_n_input(&mut self, text: &str) {
        self.set_top_n(leading_count(text));
    }

    /// Include everything ranked at or above position `index`.
    pub fn select_by_index(&mut self, index: usize) {
        self.set_top_n(index.saturating_add(1));
    }

    #[must_use]
    pub const fn top_n(&self) -> Option<usize> {
        self.top_n
    }

    #[must_use]
    pub fn is_included(&self, index: usize) -> bool {
        self.top_n.is_some_and(|n| index < n)
    }

    #[must_use]
    pub fn included(&self) -> &[AnalysisResult] {
        &self.results[..self.top_n.unwrap_or(0)]
    }

    #[must_use]
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn entries(&self) -> impl Iterator<Item = RankedEntry<'_>> {
        self.results.iter().enumerate().map(|(i, result)| RankedEntry {
            rank: i + 1,
            similarity: result.similarity(),
            result,
            included: self.is_included(i),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The `n` best entries by distance, re-sorted regardless of stored order.
    /// Equal distances keep their stored order.
    #[must_use]
    pub fn sorted_selection(&self, n: usize) -> Vec<&AnalysisResult> {
        let mut sorted: Vec<&AnalysisResult> = self.results.iter().collect();
        sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        sorted.truncate(n);
        sorted
    }
}

fn leading_count(text: &str) -> usize {
    let text = text.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    match unsigned[..end].parse::<usize>() {
        Ok(n) if !negative => n,
        // Too many digits for usize: clamps to the whole set anyway.
        Err(_) if !negative && end > 0 => usize::MAX,
        _ => 1,
    }
}
