//! Client directory use case.

use clinic_domain::{Client, ClientId, Listing, ListingView, SearchTerm};

use crate::api::ApiClient;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;

/// State behind the client list view.
pub struct ClientDirectory<T: HttpTransport> {
    api: ApiClient<T>,
    listing: Listing<Client>,
    /// Search over name, email and phone.
    pub search: SearchTerm,
}

impl<T: HttpTransport> ClientDirectory<T> {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            listing: Listing::default(),
            search: SearchTerm::default(),
        }
    }

    /// Fetches every client.
    ///
    /// # Errors
    ///
    /// Any error from the list call. The previously held list is kept.
    pub async fn load(&mut self) -> ApplicationResult<usize> {
        let clients = self.api.list_clients().await?;
        self.listing.replace(clients);
        Ok(self.listing.len())
    }

    /// Every held client, unfiltered.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        self.listing.items()
    }

    /// Clients matching the current search.
    #[must_use]
    pub fn view(&self) -> ListingView<'_, Client> {
        self.listing.view(|c| self.search.matches(c))
    }

    /// Looks up a held client.
    #[must_use]
    pub fn find(&self, id: &ClientId) -> Option<&Client> {
        self.listing.find(|c| &c.id == id)
    }
}
