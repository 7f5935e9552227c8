use store::KeyValueStore;

use super::ignored;
use crate::auth::Session;
use crate::clock;
use crate::error::PortalError;
use crate::models::{News, NewsCategory, NewsDraft};
use crate::seed::merge_by_id;
use crate::Portal;

impl<S: KeyValueStore> Portal<S> {
    /// Seed articles followed by published ones, optionally of one category.
    pub async fn news(&self, category: Option<NewsCategory>) -> Result<Vec<News>, PortalError> {
        let overlay = self.news_overlay().load().await?;
        let mut news = merge_by_id(self.seed.news.clone(), overlay);
        if let Some(category) = category {
            news.retain(|n| n.category == category);
        }
        Ok(news)
    }

    pub async fn news_item(&self, id: &str) -> Result<News, PortalError> {
        if let Some(item) = self.news_overlay().find(id).await? {
            return Ok(item);
        }
        self.seed
            .news_item(id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("News", id))
    }

    /// Publish an article. Admin only.
    pub async fn create_news(
        &self,
        session: &Session,
        draft: NewsDraft,
    ) -> Result<Option<News>, PortalError> {
        let Some(user) = session.user().filter(|_| session.capabilities().can_manage_content) else {
            return ignored("create_news", "session cannot manage content");
        };

        let item = News {
            id: clock::new_id("news"),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            image: draft.image.filter(|url| !url.trim().is_empty()),
            likes: 0,
            dislikes: 0,
            created_at: clock::now(),
            created_by: user.username.clone(),
        };
        let item = self.news_overlay().append(item).await?;
        tracing::info!("{} published news {} ({})", user.username, item.id, item.category);
        Ok(Some(item))
    }

    /// Bump the like counter. Every call counts, including repeats by the
    /// same user.
    pub async fn like_news(&self, session: &Session, id: &str) -> Result<Option<News>, PortalError> {
        if !session.capabilities().can_like_content {
            return ignored("like_news", "no active session");
        }
        let fallback = self.seed.news_item(id).cloned();
        Ok(self
            .news_overlay()
            .update_or_insert(id, fallback, |n| n.likes += 1)
            .await?)
    }
}
