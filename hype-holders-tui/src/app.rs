//! Dashboard state and key handling.

use crossterm::event::KeyCode;
use hype_holders::{
    ClusterTag, DashboardSummary, HolderRecord, Market, Partition, ThresholdConfig, Tier, classify,
};

/// Immutable record set plus the active view.
#[derive(Debug)]
pub struct App {
    records: Vec<HolderRecord>,
    thresholds: ThresholdConfig,
    summary: DashboardSummary,
    partition: Partition,
    active: ClusterTag,
    market: Market,
    export_requested: bool,
    should_quit: bool,
}

impl App {
    pub fn new(records: Vec<HolderRecord>, thresholds: ThresholdConfig) -> Self {
        let summary = DashboardSummary::compute(&records, &thresholds);
        let partition = Partition::compute(&records, &thresholds);
        Self {
            records,
            thresholds,
            summary,
            partition,
            active: ClusterTag::All,
            market: Market::Spot,
            export_requested: false,
            should_quit: false,
        }
    }

    pub fn active(&self) -> ClusterTag {
        self.active
    }

    pub fn market(&self) -> Market {
        self.market
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    /// Member count of `tag` over the whole record set.
    pub fn count(&self, tag: ClusterTag) -> usize {
        self.partition.count(tag)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn export_requested(&self) -> bool {
        self.export_requested
    }

    /// Records of the active view in rank order.
    pub fn view(&self) -> Vec<&HolderRecord> {
        classify(&self.records, self.active, &self.thresholds)
    }

    /// Sidebar entries for the selected market.
    pub fn sidebar(&self) -> [ClusterTag; 5] {
        [
            ClusterTag::All,
            ClusterTag::Official,
            ClusterTag::tiered(self.market, Tier::Whale),
            ClusterTag::tiered(self.market, Tier::Mid),
            ClusterTag::tiered(self.market, Tier::Retail),
        ]
    }

    pub fn select(&mut self, tag: ClusterTag) {
        if let Some(market) = tag.market() {
            self.market = market;
        }
        self.active = tag;
    }

    /// Switch market, moving a tiered or untiered view onto the same tier of the other market.
    pub fn toggle_market(&mut self) {
        self.market = self.market.toggle();
        self.active = self.active.counterpart(self.market);
    }

    fn step(&mut self, forward: bool) {
        let entries = self.sidebar();
        let len = entries.len();
        let index = entries
            .iter()
            .position(|tag| *tag == self.active)
            .unwrap_or(0);
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        self.select(entries[next]);
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.step(true),
            KeyCode::Up | KeyCode::Char('k') => self.step(false),
            KeyCode::Tab => self.toggle_market(),
            KeyCode::Char('e') => self.export_requested = !self.export_requested,
            KeyCode::Char(digit @ '1'..='8') => {
                let index = digit as usize - '1' as usize;
                self.select(ClusterTag::ALL_TAGS[index]);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hype_holders::seed::seed_records;

    fn app() -> App {
        App::new(seed_records(42), ThresholdConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.active(), ClusterTag::All);
        assert_eq!(app.market(), Market::Spot);
        assert_eq!(app.view().len(), app.summary().record_count);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_handle_key() {
        struct TestCase {
            input: Vec<KeyCode>,
            expected: (ClusterTag, Market),
        }

        let tests = vec![
            TestCase {
                // TC0: down moves to official
                input: vec![KeyCode::Down],
                expected: (ClusterTag::Official, Market::Spot),
            },
            TestCase {
                // TC1: up wraps to the retail tier
                input: vec![KeyCode::Char('k')],
                expected: (ClusterTag::SpotRetail, Market::Spot),
            },
            TestCase {
                // TC2: tab from ALL lands on the perp whale tier
                input: vec![KeyCode::Tab],
                expected: (ClusterTag::PerpWhale, Market::Perp),
            },
            TestCase {
                // TC3: tab keeps the tier
                input: vec![KeyCode::Char('4'), KeyCode::Tab],
                expected: (ClusterTag::PerpMid, Market::Perp),
            },
            TestCase {
                // TC4: digit jump follows the tag's market
                input: vec![KeyCode::Char('8')],
                expected: (ClusterTag::PerpRetail, Market::Perp),
            },
            TestCase {
                // TC5: navigation stays within the selected market
                input: vec![KeyCode::Char('6'), KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Down],
                expected: (ClusterTag::All, Market::Perp),
            },
            TestCase {
                // TC6: unknown keys ignored
                input: vec![KeyCode::Char('x'), KeyCode::Char('9'), KeyCode::Left],
                expected: (ClusterTag::All, Market::Spot),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let mut app = app();
            for key in test.input {
                app.handle_key(key);
            }
            assert_eq!((app.active(), app.market()), test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_quit_and_export() {
        let mut app = app();
        app.handle_key(KeyCode::Char('e'));
        assert!(app.export_requested());

        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_view_matches_classifier() {
        let mut app = app();
        let records = seed_records(42);

        for tag in ClusterTag::ALL_TAGS {
            app.select(tag);
            let expected = classify(&records, tag, &ThresholdConfig::default());
            assert_eq!(app.view(), expected, "{tag} view mismatch");
        }
    }
}
