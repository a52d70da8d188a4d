//! Catalog service implementation.

use async_trait::async_trait;
use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::errors::{Error, ValidationError};
use crate::utils::text_utils::{clean_labels, resolve_slug};
use crate::Result;

use super::{
    CatalogError, Category, CategoryNode, CategoryRepositoryTrait, CategoryServiceTrait,
    CategorySpecGroup, NewCategory, NewSpecGroup, SpecGroup,
};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Arrange a flat category list into a forest. Categories whose parent is
    /// unknown are promoted to roots so they stay reachable.
    fn build_tree(categories: Vec<Category>) -> Vec<CategoryNode> {
        let known: HashSet<String> = categories.iter().map(|c| c.id.clone()).collect();

        let mut children_map: HashMap<Option<String>, Vec<Category>> = HashMap::new();
        for cat in categories {
            let parent = cat.parent_id.clone().filter(|p| known.contains(p));
            children_map.entry(parent).or_default().push(cat);
        }

        Self::take_children(&mut children_map, None)
    }

    fn take_children(
        children_map: &mut HashMap<Option<String>, Vec<Category>>,
        parent_id: Option<String>,
    ) -> Vec<CategoryNode> {
        let Some(children) = children_map.remove(&parent_id) else {
            return Vec::new();
        };

        children
            .into_iter()
            .map(|category| {
                let children = Self::take_children(children_map, Some(category.id.clone()));
                CategoryNode { category, children }
            })
            .collect()
    }

    /// Refuses a parent assignment that would break the acyclic tree: the
    /// parent must exist and must not be the category or one of its descendants.
    fn ensure_valid_parent(&self, category_id: &str, new_parent_id: Option<&str>) -> Result<()> {
        let Some(parent_id) = new_parent_id else {
            return Ok(());
        };

        if parent_id == category_id {
            return Err(CatalogError::InvalidParent {
                category_id: category_id.to_string(),
                reason: "a category cannot be its own parent".to_string(),
            }
            .into());
        }

        let parents: HashMap<String, Option<String>> = self
            .repository
            .get_categories()?
            .into_iter()
            .map(|c| (c.id, c.parent_id))
            .collect();

        if !parents.contains_key(parent_id) {
            return Err(CatalogError::CategoryNotFound(parent_id.to_string()).into());
        }

        let mut visited = HashSet::new();
        let mut cursor = Some(parent_id.to_string());
        while let Some(current) = cursor {
            if current == category_id {
                return Err(CatalogError::InvalidParent {
                    category_id: category_id.to_string(),
                    reason: "the new parent is one of its descendants".to_string(),
                }
                .into());
            }
            if !visited.insert(current.clone()) {
                return Err(CatalogError::CategoryCycle(current).into());
            }
            cursor = parents.get(&current).cloned().flatten();
        }

        Ok(())
    }

    fn require_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }

    fn ensure_slug_available(&self, slug: &str, owner_id: Option<&str>) -> Result<()> {
        if slug.is_empty() {
            return Err(ValidationError::InvalidInput(
                "Category slug must contain letters or digits".to_string(),
            )
            .into());
        }
        if let Some(existing) = self.repository.get_category_by_slug(slug)? {
            if owner_id != Some(existing.id.as_str()) {
                return Err(Error::ConstraintViolation(format!(
                    "Category slug '{}' is already in use",
                    slug
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.repository.get_categories()
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.repository.get_category(id)
    }

    fn get_category_tree(&self) -> Result<Vec<CategoryNode>> {
        let categories = self.repository.get_categories()?;
        Ok(Self::build_tree(categories))
    }

    fn get_category_children(&self, id: &str) -> Result<Vec<Category>> {
        if self.repository.get_category(id)?.is_none() {
            return Err(CatalogError::CategoryNotFound(id.to_string()).into());
        }
        self.repository.get_children(id)
    }

    fn get_descendant_ids(&self, id: &str) -> Result<Vec<String>> {
        let categories = self.repository.get_categories()?;
        if !categories.iter().any(|c| c.id == id) {
            return Err(CatalogError::CategoryNotFound(id.to_string()).into());
        }

        let mut children_map: HashMap<&str, Vec<&str>> = HashMap::new();
        for cat in &categories {
            if let Some(parent) = cat.parent_id.as_deref() {
                children_map.entry(parent).or_default().push(cat.id.as_str());
            }
        }

        let mut result = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current.to_string());
            if let Some(children) = children_map.get(current) {
                queue.extend(children.iter().copied());
            }
        }

        Ok(result)
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        Self::require_name(&category.name)?;
        if let Some(parent_id) = category.parent_id.as_deref() {
            if self.repository.get_category(parent_id)?.is_none() {
                return Err(CatalogError::CategoryNotFound(parent_id.to_string()).into());
            }
        }

        let slug = resolve_slug(category.slug.as_deref(), &category.name);
        self.ensure_slug_available(&slug, None)?;

        let category = NewCategory {
            name: category.name.trim().to_string(),
            slug: Some(slug),
            ..category
        };
        self.repository.create_category(category).await
    }

    async fn update_category(&self, category: Category) -> Result<Category> {
        Self::require_name(&category.name)?;
        if self.repository.get_category(&category.id)?.is_none() {
            return Err(CatalogError::CategoryNotFound(category.id).into());
        }
        self.ensure_valid_parent(&category.id, category.parent_id.as_deref())?;

        let slug = resolve_slug(Some(&category.slug), &category.name);
        self.ensure_slug_available(&slug, Some(&category.id))?;

        let category = Category {
            name: category.name.trim().to_string(),
            slug,
            ..category
        };
        self.repository.update_category(category).await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        if self.repository.get_category(id)?.is_none() {
            return Err(CatalogError::CategoryNotFound(id.to_string()).into());
        }

        let children = self.repository.get_children(id)?;
        if !children.is_empty() {
            return Err(CatalogError::CategoryNotEmpty(
                id.to_string(),
                format!("{} sub-categories", children.len()),
            )
            .into());
        }

        let products = self.repository.count_category_products(id)?;
        if products > 0 {
            return Err(CatalogError::CategoryNotEmpty(
                id.to_string(),
                format!("{} products", products),
            )
            .into());
        }

        self.repository.delete_category(id).await
    }

    async fn move_category(&self, id: &str, new_parent_id: Option<String>) -> Result<Category> {
        let category = self
            .repository
            .get_category(id)?
            .ok_or_else(|| CatalogError::CategoryNotFound(id.to_string()))?;

        self.ensure_valid_parent(id, new_parent_id.as_deref())?;

        let moved = Category {
            parent_id: new_parent_id,
            ..category
        };
        self.repository.update_category(moved).await
    }

    fn get_category_specs(&self, category_id: &str) -> Result<Vec<SpecGroup>> {
        if category_id.trim().is_empty() {
            return Err(ValidationError::MissingField("categoryId".to_string()).into());
        }

        let mut resolved: Vec<SpecGroup> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next = Some(category_id.to_string());

        while let Some(current) = next {
            if !visited.insert(current.clone()) {
                return Err(CatalogError::CategoryCycle(current).into());
            }

            let level = self
                .repository
                .get_spec_level(&current)?
                .ok_or_else(|| CatalogError::CategoryNotFound(current.clone()))?;

            // Ancestor groups go in front of everything collected below them
            let mut groups = level.spec_groups;
            groups.append(&mut resolved);
            resolved = groups;

            next = level.parent_id;
        }

        debug!(
            "Resolved {} specification groups for category {} across {} levels",
            resolved.len(),
            category_id,
            visited.len()
        );
        Ok(resolved)
    }

    fn get_category_spec_groups(&self, category_id: &str) -> Result<Vec<SpecGroup>> {
        self.repository
            .get_spec_level(category_id)?
            .map(|level| level.spec_groups)
            .ok_or_else(|| CatalogError::CategoryNotFound(category_id.to_string()).into())
    }

    fn get_spec_groups(&self) -> Result<Vec<SpecGroup>> {
        self.repository.get_spec_groups()
    }

    fn get_spec_group(&self, id: &str) -> Result<Option<SpecGroup>> {
        self.repository.get_spec_group(id)
    }

    async fn create_spec_group(&self, group: NewSpecGroup) -> Result<SpecGroup> {
        if group.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        let group = NewSpecGroup {
            id: group.id,
            title: group.title.trim().to_string(),
            specs: clean_labels(group.specs),
        };
        self.repository.create_spec_group(group).await
    }

    async fn update_spec_group(&self, group: SpecGroup) -> Result<SpecGroup> {
        if group.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.repository.get_spec_group(&group.id)?.is_none() {
            return Err(CatalogError::SpecGroupNotFound(group.id).into());
        }
        let group = SpecGroup {
            title: group.title.trim().to_string(),
            specs: clean_labels(group.specs),
            ..group
        };
        self.repository.update_spec_group(group).await
    }

    async fn delete_spec_group(&self, id: &str) -> Result<usize> {
        self.repository.delete_spec_group(id).await
    }

    async fn attach_spec_group(&self, link: CategorySpecGroup) -> Result<CategorySpecGroup> {
        if self.repository.get_category(&link.category_id)?.is_none() {
            return Err(CatalogError::CategoryNotFound(link.category_id).into());
        }
        if self.repository.get_spec_group(&link.spec_group_id)?.is_none() {
            return Err(CatalogError::SpecGroupNotFound(link.spec_group_id).into());
        }
        self.repository.attach_spec_group(link).await
    }

    async fn detach_spec_group(&self, category_id: &str, spec_group_id: &str) -> Result<usize> {
        self.repository
            .detach_spec_group(category_id, spec_group_id)
            .await
    }
}
