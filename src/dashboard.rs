use std::path::Path;
use std::sync::Arc;

use crate::aggregate::{self, ChartRow, SummaryTables, TeamPerformance};
use crate::cascade::{PlayerDetailView, SelectionCascade, SelectionState};
use crate::dataset::{Dataset, PlayerId, TeamId};
use crate::error::{DataLoadError, InvalidSelectionError};
use crate::loader;

#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    tables: Arc<SummaryTables>,
    cascade: SelectionCascade,
}

impl Dashboard {
    pub fn new(dataset: Dataset, top_limit: usize) -> Self {
        let dataset = Arc::new(dataset);
        let tables = Arc::new(SummaryTables::compute(&dataset, top_limit));
        let cascade = SelectionCascade::new(Arc::clone(&dataset));
        Self {
            dataset,
            tables,
            cascade,
        }
    }

    pub fn load(matches: &Path, players: &Path, top_limit: usize) -> Result<Self, DataLoadError> {
        let dataset = loader::load_dataset(matches, players)?;
        Ok(Self::new(dataset, top_limit))
    }

    /// A fresh selection over the same data and tables.
    pub fn session(&self) -> Self {
        Self {
            dataset: Arc::clone(&self.dataset),
            tables: Arc::clone(&self.tables),
            cascade: SelectionCascade::new(Arc::clone(&self.dataset)),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn tables(&self) -> &SummaryTables {
        &self.tables
    }

    pub fn team_list(&self) -> &[TeamId] {
        self.dataset.teams()
    }

    pub fn team_performance(&self) -> &[TeamPerformance] {
        &self.tables.team_performance
    }

    pub fn top_player_of_match(&self, limit: usize) -> Vec<ChartRow> {
        aggregate::top_player_of_the_match(&self.dataset, limit)
    }

    pub fn top_scorers(&self, limit: usize) -> Vec<ChartRow> {
        aggregate::top_scorers(&self.dataset, limit)
    }

    pub fn toss_win_correlation(&self) -> &[ChartRow] {
        &self.tables.toss_win_correlation
    }

    pub fn best_bowling_frequency(&self, limit: usize) -> Vec<ChartRow> {
        aggregate::best_bowling_frequency(&self.dataset, limit)
    }

    pub fn venue_frequency(&self) -> &[ChartRow] {
        &self.tables.venue_frequency
    }

    pub fn toss_decision_distribution(&self) -> &[ChartRow] {
        &self.tables.toss_decision_distribution
    }

    pub fn win_margin_distribution(&self) -> &[ChartRow] {
        &self.tables.win_margin_distribution
    }

    pub fn select_team(&mut self, team: &str) -> Result<(), InvalidSelectionError> {
        self.cascade.select_team(team)
    }

    pub fn select_player(&mut self, player: &str) -> Result<(), InvalidSelectionError> {
        self.cascade.select_player(player)
    }

    pub fn selection_state(&self) -> &SelectionState {
        self.cascade.state()
    }

    pub fn current_player_list(&self) -> &[PlayerId] {
        self.cascade.player_list()
    }

    pub fn current_player_detail(&self) -> PlayerDetailView {
        self.cascade.player_detail()
    }

    pub fn cascade(&self) -> &SelectionCascade {
        &self.cascade
    }
}
