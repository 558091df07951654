//! Item request service: posting "looking for X" requests and reading them
//! back enriched with the items that answer them.

use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemRequest, NewItemRequest};
use crate::repositories::{ItemRepository, ItemRequestRepository, UserRepository};
use crate::utils::time;

/// An item request together with every item referencing it. The item list
/// is always present, possibly empty.
#[derive(Debug)]
pub struct EnrichedRequest {
    pub request: ItemRequest,
    pub items: Vec<Item>,
}

/// Groups items under the request each one answers, preserving request
/// order. Requests nothing answers get an empty item list.
fn group_by_request(requests: Vec<ItemRequest>, items: Vec<Item>) -> Vec<EnrichedRequest> {
    let mut by_request: HashMap<i64, Vec<Item>> = HashMap::new();
    for item in items {
        if let Some(rid) = item.request_id {
            by_request.entry(rid).or_default().push(item);
        }
    }

    requests
        .into_iter()
        .map(|request| {
            let items = by_request.remove(&request.id).unwrap_or_default();
            EnrichedRequest { request, items }
        })
        .collect()
}

#[derive(Clone)]
pub struct ItemRequestService {
    requests: ItemRequestRepository,
    users: UserRepository,
    items: ItemRepository,
}

impl ItemRequestService {
    pub fn new(
        requests: ItemRequestRepository,
        users: UserRepository,
        items: ItemRepository,
    ) -> Self {
        Self {
            requests,
            users,
            items,
        }
    }

    /// Posts a new request, stamped with the current time.
    pub async fn create_request(
        &self,
        user_id: i64,
        description: String,
    ) -> AppResult<ItemRequest> {
        self.require_user(user_id).await?;
        self.requests
            .create(NewItemRequest {
                description,
                requestor_id: user_id,
                created: time::now_db(),
            })
            .await
    }

    /// The caller's own requests, newest first, enriched.
    pub async fn get_own_requests(&self, user_id: i64) -> AppResult<Vec<EnrichedRequest>> {
        self.require_user(user_id).await?;
        let requests = self.requests.find_by_requestor(user_id).await?;
        self.enrich_with_items(requests).await
    }

    /// Requests posted by other users, newest first, with offset pagination.
    pub async fn get_all_requests(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<EnrichedRequest>> {
        self.require_user(user_id).await?;
        if from < 0 || size <= 0 {
            return Err(AppError::validation(
                "pagination",
                "'from' must be non-negative and 'size' positive",
            ));
        }
        let requests = self
            .requests
            .find_by_other_requestors(user_id, from, size)
            .await?;
        self.enrich_with_items(requests).await
    }

    /// A single request by id, enriched.
    pub async fn get_request(&self, user_id: i64, request_id: i64) -> AppResult<EnrichedRequest> {
        self.require_user(user_id).await?;
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("request", request_id))?;
        let mut enriched = self.enrich_with_items(vec![request]).await?;
        // One request in, one enriched request out.
        Ok(enriched.remove(0))
    }

    /// Batch-fetches all items answering any of the given requests and
    /// groups them per request.
    async fn enrich_with_items(
        &self,
        requests: Vec<ItemRequest>,
    ) -> AppResult<Vec<EnrichedRequest>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let items = self.items.find_by_request_ids(&ids).await?;
        Ok(group_by_request(requests, items))
    }

    async fn require_user(&self, user_id: i64) -> AppResult<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", user_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time;

    fn request(id: i64) -> ItemRequest {
        ItemRequest {
            id,
            description: format!("Need item for request {}", id),
            requestor_id: 1,
            created: time::now_db(),
        }
    }

    fn item(id: i64, request_id: Option<i64>) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            description: "An item".to_string(),
            available: true,
            owner_id: 2,
            request_id,
        }
    }

    #[test]
    fn test_items_are_grouped_under_their_request() {
        let enriched = group_by_request(
            vec![request(1), request(2)],
            vec![item(10, Some(1)), item(11, Some(2)), item(12, Some(1))],
        );

        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].request.id, 1);
        let ids: Vec<i64> = enriched[0].items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(enriched[1].items.len(), 1);
        assert_eq!(enriched[1].items[0].id, 11);
    }

    #[test]
    fn test_unanswered_request_gets_empty_item_list() {
        let enriched = group_by_request(vec![request(1)], Vec::new());

        assert_eq!(enriched.len(), 1);
        assert!(enriched[0].items.is_empty());
    }

    #[test]
    fn test_request_order_is_preserved() {
        let enriched = group_by_request(
            vec![request(3), request(1), request(2)],
            vec![item(10, Some(2))],
        );

        let order: Vec<i64> = enriched.iter().map(|e| e.request.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
