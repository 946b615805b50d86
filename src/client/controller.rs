use fleet_schema::{CrewMemberDraft, ShipDraft, ShipField, SortOrder};
use tracing::debug;

use super::{
    CrewListView, DialogState, DialogSubmit, FleetClient, ShipListView, ShipQueryState,
};
use crate::error::ClientError;

/// Drives the ship table: owns the query state and the fetched views, and
/// keeps them in step with the server.
///
/// Each parameter change results in exactly one list fetch. After a
/// successful mutation the current parameters are fetched again, so the
/// visible page and filters survive adds, saves and deletes.
///
/// Every method takes `&mut self` across its fetch, so the controller never
/// has two fetches in flight. The [`FetchView`](super::FetchView) tickets
/// matter to callers that drive a view from concurrent tasks.
#[derive(Debug)]
pub struct ShipListController {
    client: FleetClient,
    query: ShipQueryState,
    ships: ShipListView,
    crew: CrewListView,
    selected: Option<i64>,
    pub ship_dialog: DialogState<ShipDraft>,
    pub crew_dialog: DialogState<CrewMemberDraft>,
}

impl ShipListController {
    pub fn new(client: FleetClient) -> Self {
        Self {
            client,
            query: ShipQueryState::default(),
            ships: ShipListView::default(),
            crew: CrewListView::default(),
            selected: None,
            ship_dialog: DialogState::Closed,
            crew_dialog: DialogState::Closed,
        }
    }

    pub fn query(&self) -> &ShipQueryState {
        &self.query
    }

    pub fn ships(&self) -> &ShipListView {
        &self.ships
    }

    pub fn crew(&self) -> &CrewListView {
        &self.crew
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Fetches the ship list for the current parameters.
    pub async fn refresh(&mut self) {
        let params = self.query.to_params();
        let ticket = self.ships.begin();
        let result = self.client.list_ships(&params).await;
        self.ships.apply(ticket, result);
    }

    async fn refresh_if(&mut self, changed: bool) -> bool {
        if changed {
            self.refresh().await;
        }
        changed
    }

    pub async fn set_filter(&mut self, field: ShipField, value: &str) -> bool {
        let changed = self.query.set_filter(field, value);
        self.refresh_if(changed).await
    }

    pub async fn apply_filters<'a, I>(&mut self, edits: I) -> bool
    where
        I: IntoIterator<Item = (ShipField, &'a str)>,
    {
        let changed = self.query.apply_filters(edits);
        self.refresh_if(changed).await
    }

    pub async fn clear_filters(&mut self) -> bool {
        let changed = self.query.clear_filters();
        self.refresh_if(changed).await
    }

    pub async fn set_sort(&mut self, field: ShipField, order: SortOrder) -> bool {
        let changed = self.query.set_sort(field, order);
        self.refresh_if(changed).await
    }

    pub async fn clear_sort(&mut self) -> bool {
        let changed = self.query.clear_sort();
        self.refresh_if(changed).await
    }

    pub async fn set_page(&mut self, page: u32) -> bool {
        let changed = self.query.set_page(page);
        self.refresh_if(changed).await
    }

    pub async fn set_page_size(&mut self, page_size: u32) -> bool {
        let changed = self.query.set_page_size(page_size);
        self.refresh_if(changed).await
    }

    pub async fn add_ship(&mut self, ship: &ShipDraft) -> Result<(), ClientError> {
        self.client.add_ship(ship).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn save_ship(&mut self, id: i64, ship: &ShipDraft) -> Result<(), ClientError> {
        self.client.save_ship(id, ship).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn delete_ship(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_ship(id).await?;
        if self.selected == Some(id) {
            self.selected = None;
            self.crew.clear();
        }
        self.refresh().await;
        Ok(())
    }

    /// Sends the ship dialog's form. Returns `false` if the dialog was closed.
    pub async fn submit_ship_dialog(&mut self) -> Result<bool, ClientError> {
        match self.ship_dialog.submit() {
            None => Ok(false),
            Some(DialogSubmit::Create(form)) => self.add_ship(&form).await.map(|()| true),
            Some(DialogSubmit::Update { id, form }) => {
                self.save_ship(id, &form).await.map(|()| true)
            }
        }
    }

    /// Selects a ship and loads its crew.
    pub async fn show_crew(&mut self, ship_id: i64) {
        if self.selected != Some(ship_id) {
            self.crew.clear();
        }
        self.selected = Some(ship_id);
        self.refresh_crew().await;
    }

    async fn refresh_crew(&mut self) {
        let Some(ship_id) = self.selected else {
            return;
        };
        let ticket = self.crew.begin();
        let result = self.client.list_crew_members(ship_id).await;
        self.crew.apply(ticket, result);
        debug!(ship_id, records = self.crew.data.len(), "crew list refreshed");
    }

    async fn after_crew_mutation(&mut self, ship_id: i64) {
        if self.selected == Some(ship_id) {
            self.refresh_crew().await;
        }
        self.refresh().await;
    }

    pub async fn add_crew_member(
        &mut self,
        ship_id: i64,
        member: &CrewMemberDraft,
    ) -> Result<(), ClientError> {
        self.client.add_crew_member(ship_id, member).await?;
        self.after_crew_mutation(ship_id).await;
        Ok(())
    }

    pub async fn save_crew_member(
        &mut self,
        ship_id: i64,
        id: i64,
        member: &CrewMemberDraft,
    ) -> Result<(), ClientError> {
        self.client.save_crew_member(ship_id, id, member).await?;
        self.after_crew_mutation(ship_id).await;
        Ok(())
    }

    pub async fn delete_crew_member(&mut self, ship_id: i64, id: i64) -> Result<(), ClientError> {
        self.client.delete_crew_member(ship_id, id).await?;
        self.after_crew_mutation(ship_id).await;
        Ok(())
    }

    /// Sends the crew dialog's form for the selected ship. Returns `false`
    /// if the dialog was closed or no ship is selected.
    pub async fn submit_crew_dialog(&mut self) -> Result<bool, ClientError> {
        let Some(ship_id) = self.selected else {
            self.crew_dialog.close();
            return Ok(false);
        };
        match self.crew_dialog.submit() {
            None => Ok(false),
            Some(DialogSubmit::Create(form)) => self
                .add_crew_member(ship_id, &form)
                .await
                .map(|()| true),
            Some(DialogSubmit::Update { id, form }) => self
                .save_crew_member(ship_id, id, &form)
                .await
                .map(|()| true),
        }
    }
}
