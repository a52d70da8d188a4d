//! Traits for catalog repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{
    Category, CategoryNode, CategorySpecGroup, CategorySpecLevel, NewCategory, NewSpecGroup,
    SpecGroup,
};

/// Repository trait for category and specification group persistence.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    // Category operations
    fn get_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, id: &str) -> Result<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    fn get_children(&self, parent_id: &str) -> Result<Vec<Category>>;
    fn count_category_products(&self, category_id: &str) -> Result<i64>;
    async fn create_category(&self, category: NewCategory) -> Result<Category>;
    async fn update_category(&self, category: Category) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<usize>;

    /// Own specification groups of a category plus its parent id.
    /// Returns `None` when the category does not exist.
    fn get_spec_level(&self, category_id: &str) -> Result<Option<CategorySpecLevel>>;

    // Specification group operations
    fn get_spec_groups(&self) -> Result<Vec<SpecGroup>>;
    fn get_spec_group(&self, id: &str) -> Result<Option<SpecGroup>>;
    async fn create_spec_group(&self, group: NewSpecGroup) -> Result<SpecGroup>;
    async fn update_spec_group(&self, group: SpecGroup) -> Result<SpecGroup>;
    async fn delete_spec_group(&self, id: &str) -> Result<usize>;
    async fn attach_spec_group(&self, link: CategorySpecGroup) -> Result<CategorySpecGroup>;
    async fn detach_spec_group(&self, category_id: &str, spec_group_id: &str) -> Result<usize>;
}

/// Service trait for catalog business logic.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    // Category operations
    fn get_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, id: &str) -> Result<Option<Category>>;
    fn get_category_tree(&self) -> Result<Vec<CategoryNode>>;
    fn get_category_children(&self, id: &str) -> Result<Vec<Category>>;
    /// The category id followed by the ids of every category below it.
    fn get_descendant_ids(&self, id: &str) -> Result<Vec<String>>;
    async fn create_category(&self, category: NewCategory) -> Result<Category>;
    async fn update_category(&self, category: Category) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<usize>;
    async fn move_category(&self, id: &str, new_parent_id: Option<String>) -> Result<Category>;

    // Specification inheritance
    /// Specification groups of the category and all its ancestors, root first.
    fn get_category_specs(&self, category_id: &str) -> Result<Vec<SpecGroup>>;
    fn get_category_spec_groups(&self, category_id: &str) -> Result<Vec<SpecGroup>>;

    // Specification group operations
    fn get_spec_groups(&self) -> Result<Vec<SpecGroup>>;
    fn get_spec_group(&self, id: &str) -> Result<Option<SpecGroup>>;
    async fn create_spec_group(&self, group: NewSpecGroup) -> Result<SpecGroup>;
    async fn update_spec_group(&self, group: SpecGroup) -> Result<SpecGroup>;
    async fn delete_spec_group(&self, id: &str) -> Result<usize>;
    async fn attach_spec_group(&self, link: CategorySpecGroup) -> Result<CategorySpecGroup>;
    async fn detach_spec_group(&self, category_id: &str, spec_group_id: &str) -> Result<usize>;
}
