//! Product service implementation.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{CatalogError, CategoryServiceTrait};
use crate::constants::{BASE_CURRENCY, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::currencies::{display_price, Currency};
use crate::errors::{DatabaseError, Error, ValidationError};
use crate::languages::LanguageServiceTrait;
use crate::utils::text_utils::{resolve_slug, slugify};
use crate::Result;

use super::{
    NewProduct, Product, ProductDetail, ProductFilter, ProductPage, ProductQuery,
    ProductRepositoryTrait, ProductServiceTrait, ProductSort, ProductSummary, ProductTranslation,
    ProductUpdate, SpecSheetEntry, SpecSheetGroup,
};

pub struct ProductService {
    repository: Arc<dyn ProductRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
    language_service: Arc<dyn LanguageServiceTrait>,
}

/// Language codes a listing is localized with: the requested one, then the default.
struct Locale {
    requested: String,
    fallback: String,
}

impl ProductService {
    pub fn new(
        repository: Arc<dyn ProductRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
        language_service: Arc<dyn LanguageServiceTrait>,
    ) -> Self {
        Self {
            repository,
            category_service,
            language_service,
        }
    }

    fn locale(&self, language: Option<&str>) -> Result<Locale> {
        Ok(Locale {
            requested: self.language_service.resolve_language(language)?,
            fallback: self.language_service.get_default_language()?.code,
        })
    }

    fn localize(
        product: &Product,
        translations: &[ProductTranslation],
        locale: &Locale,
        currency: Option<&Currency>,
    ) -> Result<ProductSummary> {
        let chosen = translations
            .iter()
            .find(|t| t.language_code == locale.requested)
            .or_else(|| {
                translations
                    .iter()
                    .find(|t| t.language_code == locale.fallback)
            })
            .or_else(|| translations.first());

        let (name, description, language) = match chosen {
            Some(t) => (t.name.clone(), t.description.clone(), t.language_code.clone()),
            None => (product.slug.clone(), None, locale.requested.clone()),
        };

        let (currency_code, currency_symbol) = match currency {
            Some(c) => (c.code.clone(), c.symbol.clone()),
            None => (BASE_CURRENCY.to_string(), "$".to_string()),
        };

        Ok(ProductSummary {
            id: product.id.clone(),
            category_id: product.category_id.clone(),
            slug: product.slug.clone(),
            name,
            description,
            language,
            price: product.price,
            display_price: display_price(product.price, currency)?,
            currency: currency_code,
            currency_symbol,
            image_url: product.image_url.clone(),
            stock: product.stock,
            is_active: product.is_active,
            created_at: product.created_at,
        })
    }

    fn summarize(
        &self,
        products: &[Product],
        locale: &Locale,
        currency: Option<&Currency>,
    ) -> Result<Vec<ProductSummary>> {
        let ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        let mut by_product: HashMap<String, Vec<ProductTranslation>> = HashMap::new();
        for translation in self.repository.get_translations(&ids)? {
            by_product
                .entry(translation.product_id.clone())
                .or_default()
                .push(translation);
        }

        products
            .iter()
            .map(|p| {
                let translations = by_product.get(&p.id).map(Vec::as_slice).unwrap_or(&[]);
                Self::localize(p, translations, locale, currency)
            })
            .collect()
    }

    fn sort_summaries(items: &mut [ProductSummary], sort: ProductSort) {
        match sort {
            ProductSort::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Name => {
                items.sort_by_key(|item| item.name.to_lowercase());
            }
        }
    }

    fn find_product(&self, id_or_slug: &str) -> Result<Product> {
        if let Some(product) = self.repository.get_product(id_or_slug)? {
            return Ok(product);
        }
        self.repository
            .get_product_by_slug(id_or_slug)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Product '{}'", id_or_slug)).into())
    }

    fn validate_stock_and_price(product_price: rust_decimal::Decimal, stock: i32) -> Result<()> {
        if product_price.is_sign_negative() {
            return Err(ValidationError::InvalidInput("Price cannot be negative".to_string()).into());
        }
        if stock < 0 {
            return Err(ValidationError::InvalidInput("Stock cannot be negative".to_string()).into());
        }
        Ok(())
    }

    fn ensure_category(&self, category_id: &str) -> Result<()> {
        if self.category_service.get_category(category_id)?.is_none() {
            return Err(CatalogError::CategoryNotFound(category_id.to_string()).into());
        }
        Ok(())
    }

    fn ensure_language(&self, code: &str) -> Result<String> {
        self.language_service
            .get_language(code)?
            .map(|l| l.code)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("Unknown language '{}'", code)).into()
            })
    }

    fn ensure_slug_available(&self, slug: &str, owner_id: Option<&str>) -> Result<()> {
        if slug.is_empty() {
            return Err(ValidationError::InvalidInput(
                "Product slug must contain letters or digits".to_string(),
            )
            .into());
        }
        if let Some(existing) = self.repository.get_product_by_slug(slug)? {
            if owner_id != Some(existing.id.as_str()) {
                return Err(Error::ConstraintViolation(format!(
                    "Product slug '{}' is already in use",
                    slug
                )));
            }
        }
        Ok(())
    }

    fn spec_sheet(&self, product: &Product) -> Result<Vec<SpecSheetGroup>> {
        let groups = self
            .category_service
            .get_category_specs(&product.category_id)?;
        Ok(groups
            .into_iter()
            .map(|group| SpecSheetGroup {
                entries: group
                    .specs
                    .iter()
                    .map(|label| SpecSheetEntry {
                        label: label.clone(),
                        value: product.specifications.get(label).cloned(),
                    })
                    .collect(),
                group_id: group.id,
                title: group.title,
            })
            .collect())
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    fn search_products(
        &self,
        query: ProductQuery,
        currency: Option<&Currency>,
    ) -> Result<ProductPage> {
        let locale = self.locale(query.language.as_deref())?;

        let category_ids = match query.category_id.as_deref().filter(|c| !c.trim().is_empty()) {
            None => None,
            Some(id) if query.include_subcategories => {
                Some(self.category_service.get_descendant_ids(id)?)
            }
            Some(id) => {
                self.ensure_category(id)?;
                Some(vec![id.to_string()])
            }
        };

        let filter = ProductFilter {
            category_ids,
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            include_inactive: query.include_inactive,
        };

        let products = self.repository.search_products(&filter)?;
        let mut items = self.summarize(&products, &locale, currency)?;
        Self::sort_summaries(&mut items, query.sort);

        let total = items.len() as i64;
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
        let items: Vec<ProductSummary> = items
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        debug!(
            "Product search matched {} products, returning page {} ({} items)",
            total,
            page,
            items.len()
        );

        Ok(ProductPage {
            items,
            total,
            page,
            per_page,
        })
    }

    fn get_product(
        &self,
        id_or_slug: &str,
        language: Option<&str>,
        currency: Option<&Currency>,
    ) -> Result<ProductDetail> {
        let product = self.find_product(id_or_slug)?;
        let locale = self.locale(language)?;
        let translations = self
            .repository
            .get_translations(std::slice::from_ref(&product.id))?;
        let summary = Self::localize(&product, &translations, &locale, currency)?;
        let specifications = self.spec_sheet(&product)?;

        Ok(ProductDetail {
            summary,
            translations,
            specifications,
        })
    }

    fn get_summaries(
        &self,
        ids: &[String],
        language: Option<&str>,
        currency: Option<&Currency>,
    ) -> Result<Vec<ProductSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let locale = self.locale(language)?;
        let products = self.repository.get_products_by_ids(ids)?;
        let mut summaries: HashMap<String, ProductSummary> = self
            .summarize(&products, &locale, currency)?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        Ok(ids.iter().filter_map(|id| summaries.remove(id)).collect())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        Self::validate_stock_and_price(product.price, product.stock)?;
        self.ensure_category(&product.category_id)?;

        let Some(first) = product.translations.first() else {
            return Err(ValidationError::MissingField("translations".to_string()).into());
        };
        let slug = resolve_slug(product.slug.as_deref(), &first.name);
        self.ensure_slug_available(&slug, None)?;

        let mut translations = Vec::with_capacity(product.translations.len());
        for translation in product.translations {
            if translation.name.trim().is_empty() {
                return Err(ValidationError::MissingField("name".to_string()).into());
            }
            let language_code = self.ensure_language(&translation.language_code)?;
            translations.push(ProductTranslation {
                language_code,
                name: translation.name.trim().to_string(),
                ..translation
            });
        }

        let product = NewProduct {
            slug: Some(slug),
            translations,
            ..product
        };
        self.repository.create_product(product).await
    }

    async fn update_product(&self, product: ProductUpdate) -> Result<Product> {
        if self.repository.get_product(&product.id)?.is_none() {
            return Err(DatabaseError::NotFound(format!("Product '{}'", product.id)).into());
        }
        Self::validate_stock_and_price(product.price, product.stock)?;
        self.ensure_category(&product.category_id)?;

        let slug = slugify(&product.slug);
        self.ensure_slug_available(&slug, Some(&product.id))?;

        self.repository
            .update_product(ProductUpdate { slug, ..product })
            .await
    }

    async fn delete_product(&self, id: &str) -> Result<usize> {
        self.repository.delete_product(id).await
    }

    async fn upsert_translation(
        &self,
        translation: ProductTranslation,
    ) -> Result<ProductTranslation> {
        if self.repository.get_product(&translation.product_id)?.is_none() {
            return Err(
                DatabaseError::NotFound(format!("Product '{}'", translation.product_id)).into(),
            );
        }
        if translation.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let language_code = self.ensure_language(&translation.language_code)?;
        self.repository
            .upsert_translation(ProductTranslation {
                language_code,
                name: translation.name.trim().to_string(),
                ..translation
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, CategoryNode, CategorySpecGroup, NewCategory, NewSpecGroup, SpecGroup};
    use crate::languages::{Language, LanguageRepositoryTrait, LanguageService};
    use chrono::{Duration, NaiveDateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockProductRepository {
        products: Mutex<Vec<Product>>,
        translations: Mutex<Vec<ProductTranslation>>,
    }

    #[async_trait]
    impl ProductRepositoryTrait for MockProductRepository {
        fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
            let translations = self.translations.lock().unwrap();
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| filter.include_inactive || p.is_active)
                .filter(|p| match &filter.category_ids {
                    Some(ids) => ids.contains(&p.category_id),
                    None => true,
                })
                .filter(|p| match &filter.search {
                    Some(term) => translations.iter().any(|t| {
                        t.product_id == p.id
                            && t.name.to_lowercase().contains(&term.to_lowercase())
                    }),
                    None => true,
                })
                .cloned()
                .collect())
        }

        fn get_product(&self, id: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.slug == slug)
                .cloned())
        }

        fn get_products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        }

        fn get_translations(&self, product_ids: &[String]) -> Result<Vec<ProductTranslation>> {
            Ok(self
                .translations
                .lock()
                .unwrap()
                .iter()
                .filter(|t| product_ids.contains(&t.product_id))
                .cloned()
                .collect())
        }

        async fn create_product(&self, product: NewProduct) -> Result<Product> {
            let now = Utc::now().naive_utc();
            let id = product.id.clone().unwrap_or_else(|| "generated".to_string());
            let created = Product {
                id: id.clone(),
                category_id: product.category_id,
                slug: product.slug.unwrap_or_default(),
                price: product.price,
                image_url: product.image_url,
                stock: product.stock,
                is_active: product.is_active,
                specifications: product.specifications,
                created_at: now,
                updated_at: now,
            };
            self.products.lock().unwrap().push(created.clone());
            let mut translations = self.translations.lock().unwrap();
            for t in product.translations {
                translations.push(ProductTranslation {
                    product_id: id.clone(),
                    ..t
                });
            }
            Ok(created)
        }

        async fn update_product(&self, product: ProductUpdate) -> Result<Product> {
            let mut products = self.products.lock().unwrap();
            let existing = products.iter_mut().find(|p| p.id == product.id).unwrap();
            existing.slug = product.slug;
            existing.price = product.price;
            existing.category_id = product.category_id;
            Ok(existing.clone())
        }

        async fn delete_product(&self, id: &str) -> Result<usize> {
            let mut products = self.products.lock().unwrap();
            let before = products.len();
            products.retain(|p| p.id != id);
            Ok(before - products.len())
        }

        async fn upsert_translation(
            &self,
            translation: ProductTranslation,
        ) -> Result<ProductTranslation> {
            let mut translations = self.translations.lock().unwrap();
            translations.retain(|t| {
                !(t.product_id == translation.product_id
                    && t.language_code == translation.language_code)
            });
            translations.push(translation.clone());
            Ok(translation)
        }
    }

    /// Category service stand-in: a fixed parent map and fixed groups per category.
    struct StubCategoryService {
        parents: HashMap<String, Option<String>>,
        groups: HashMap<String, Vec<SpecGroup>>,
    }

    impl StubCategoryService {
        fn new() -> Self {
            let now = Utc::now().naive_utc();
            let group = |id: &str, specs: &[&str]| SpecGroup {
                id: id.to_string(),
                title: id.to_uppercase(),
                specs: specs.iter().map(|s| s.to_string()).collect(),
                created_at: now,
                updated_at: now,
            };
            let parents = HashMap::from([
                ("computers".to_string(), None),
                ("laptops".to_string(), Some("computers".to_string())),
                ("phones".to_string(), None),
            ]);
            let groups = HashMap::from([
                ("computers".to_string(), vec![group("general", &["Brand", "Model"])]),
                ("laptops".to_string(), vec![group("display", &["Size", "Panel"])]),
            ]);
            Self { parents, groups }
        }
    }

    #[async_trait]
    impl CategoryServiceTrait for StubCategoryService {
        fn get_categories(&self) -> Result<Vec<Category>> {
            unimplemented!()
        }

        fn get_category(&self, id: &str) -> Result<Option<Category>> {
            let now = Utc::now().naive_utc();
            Ok(self.parents.get(id).map(|parent| Category {
                id: id.to_string(),
                parent_id: parent.clone(),
                name: id.to_string(),
                slug: id.to_string(),
                description: None,
                sort_order: 0,
                created_at: now,
                updated_at: now,
            }))
        }

        fn get_category_tree(&self) -> Result<Vec<CategoryNode>> {
            unimplemented!()
        }

        fn get_category_children(&self, _id: &str) -> Result<Vec<Category>> {
            unimplemented!()
        }

        fn get_descendant_ids(&self, id: &str) -> Result<Vec<String>> {
            let mut ids = vec![id.to_string()];
            ids.extend(
                self.parents
                    .iter()
                    .filter(|(_, parent)| parent.as_deref() == Some(id))
                    .map(|(child, _)| child.clone()),
            );
            Ok(ids)
        }

        async fn create_category(&self, _category: NewCategory) -> Result<Category> {
            unimplemented!()
        }

        async fn update_category(&self, _category: Category) -> Result<Category> {
            unimplemented!()
        }

        async fn delete_category(&self, _id: &str) -> Result<usize> {
            unimplemented!()
        }

        async fn move_category(
            &self,
            _id: &str,
            _new_parent_id: Option<String>,
        ) -> Result<Category> {
            unimplemented!()
        }

        fn get_category_specs(&self, category_id: &str) -> Result<Vec<SpecGroup>> {
            let mut chain = Vec::new();
            let mut cursor = Some(category_id.to_string());
            while let Some(current) = cursor {
                chain.push(current.clone());
                cursor = self.parents.get(&current).cloned().flatten();
            }
            Ok(chain
                .iter()
                .rev()
                .flat_map(|id| self.groups.get(id).cloned().unwrap_or_default())
                .collect())
        }

        fn get_category_spec_groups(&self, _category_id: &str) -> Result<Vec<SpecGroup>> {
            unimplemented!()
        }

        fn get_spec_groups(&self) -> Result<Vec<SpecGroup>> {
            unimplemented!()
        }

        fn get_spec_group(&self, _id: &str) -> Result<Option<SpecGroup>> {
            unimplemented!()
        }

        async fn create_spec_group(&self, _group: NewSpecGroup) -> Result<SpecGroup> {
            unimplemented!()
        }

        async fn update_spec_group(&self, _group: SpecGroup) -> Result<SpecGroup> {
            unimplemented!()
        }

        async fn delete_spec_group(&self, _id: &str) -> Result<usize> {
            unimplemented!()
        }

        async fn attach_spec_group(&self, _link: CategorySpecGroup) -> Result<CategorySpecGroup> {
            unimplemented!()
        }

        async fn detach_spec_group(&self, _category_id: &str, _spec_group_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    struct StaticLanguages;

    impl LanguageRepositoryTrait for StaticLanguages {
        fn get_languages(&self) -> Result<Vec<Language>> {
            Ok(vec![
                Language {
                    code: "en".to_string(),
                    name: "English".to_string(),
                    is_default: true,
                },
                Language {
                    code: "fr".to_string(),
                    name: "Français".to_string(),
                    is_default: false,
                },
            ])
        }
    }

    fn product(id: &str, category_id: &str, price: Decimal, created_at: NaiveDateTime) -> Product {
        Product {
            id: id.to_string(),
            category_id: category_id.to_string(),
            slug: id.to_string(),
            price,
            image_url: None,
            stock: 5,
            is_active: true,
            specifications: BTreeMap::new(),
            created_at,
            updated_at: created_at,
        }
    }

    fn translation(product_id: &str, lang: &str, name: &str) -> ProductTranslation {
        ProductTranslation {
            product_id: product_id.to_string(),
            language_code: lang.to_string(),
            name: name.to_string(),
            description: None,
        }
    }

    fn seeded_service() -> (ProductService, Arc<MockProductRepository>) {
        let repo = Arc::new(MockProductRepository::default());
        let base = Utc::now().naive_utc();
        {
            let mut products = repo.products.lock().unwrap();
            products.push(product("laptop-pro", "laptops", dec!(1999), base));
            products.push(product("desktop", "computers", dec!(899), base - Duration::days(1)));
            products.push(product("phone", "phones", dec!(499), base - Duration::days(2)));
            let mut hidden = product("prototype", "laptops", dec!(1), base);
            hidden.is_active = false;
            products.push(hidden);
        }
        {
            let mut translations = repo.translations.lock().unwrap();
            translations.push(translation("laptop-pro", "en", "Laptop Pro"));
            translations.push(translation("laptop-pro", "fr", "Portable Pro"));
            translations.push(translation("desktop", "en", "Desktop Tower"));
            translations.push(translation("phone", "fr", "Téléphone"));
        }
        let service = ProductService::new(
            repo.clone(),
            Arc::new(StubCategoryService::new()),
            Arc::new(LanguageService::new(Arc::new(StaticLanguages))),
        );
        (service, repo)
    }

    fn euro() -> Currency {
        Currency {
            code: "EUR".to_string(),
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            exchange_rate: dec!(1.25),
            is_default: false,
        }
    }

    #[test]
    fn test_search_localizes_and_falls_back() {
        let (service, _) = seeded_service();
        let page = service
            .search_products(
                ProductQuery {
                    language: Some("fr".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();

        assert_eq!(page.total, 3);
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        // Newest first; desktop has no French translation and falls back to English
        assert_eq!(names, vec!["Portable Pro", "Desktop Tower", "Téléphone"]);
        assert_eq!(page.items[1].language, "en");
    }

    #[test]
    fn test_search_with_subcategories_and_price_sort() {
        let (service, _) = seeded_service();
        let page = service
            .search_products(
                ProductQuery {
                    category_id: Some("computers".to_string()),
                    include_subcategories: true,
                    sort: ProductSort::PriceAsc,
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["desktop", "laptop-pro"]);

        let page = service
            .search_products(
                ProductQuery {
                    category_id: Some("computers".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_search_paginates_and_clamps_page_size() {
        let (service, _) = seeded_service();
        let page = service
            .search_products(
                ProductQuery {
                    page: Some(2),
                    per_page: Some(2),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "phone");

        let page = service
            .search_products(
                ProductQuery {
                    page: Some(0),
                    per_page: Some(1000),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_search_far_past_last_page_is_empty() {
        let (service, _) = seeded_service();
        for page in [i64::MAX, i64::MAX / 2] {
            let result = service
                .search_products(
                    ProductQuery {
                        page: Some(page),
                        per_page: Some(MAX_PAGE_SIZE),
                        ..Default::default()
                    },
                    None,
                )
                .unwrap();
            assert_eq!(result.total, 3);
            assert_eq!(result.page, page);
            assert!(result.items.is_empty());
        }
    }

    #[test]
    fn test_search_converts_display_price() {
        let (service, _) = seeded_service();
        let eur = euro();
        let page = service
            .search_products(
                ProductQuery {
                    search: Some("desktop".to_string()),
                    ..Default::default()
                },
                Some(&eur),
            )
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].price, dec!(899));
        assert_eq!(page.items[0].display_price, dec!(719.20));
        assert_eq!(page.items[0].currency, "EUR");
    }

    #[test]
    fn test_unknown_category_filter_is_an_error() {
        let (service, _) = seeded_service();
        let err = service
            .search_products(
                ProductQuery {
                    category_id: Some("garden".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_product_detail_fills_inherited_spec_sheet() {
        let (service, repo) = seeded_service();
        repo.products.lock().unwrap()[0]
            .specifications
            .insert("Size".to_string(), "14\"".to_string());

        let detail = service.get_product("laptop-pro", Some("en"), None).unwrap();
        assert_eq!(detail.summary.name, "Laptop Pro");
        assert_eq!(detail.translations.len(), 2);

        let titles: Vec<&str> = detail
            .specifications
            .iter()
            .map(|g| g.title.as_str())
            .collect();
        assert_eq!(titles, vec!["GENERAL", "DISPLAY"]);
        assert_eq!(
            detail.specifications[1].entries[0],
            SpecSheetEntry {
                label: "Size".to_string(),
                value: Some("14\"".to_string()),
            }
        );
        assert_eq!(detail.specifications[0].entries[0].value, None);
    }

    #[test]
    fn test_missing_product_is_not_found() {
        let (service, _) = seeded_service();
        assert!(service.get_product("nope", None, None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_summaries_keep_requested_order() {
        let (service, _) = seeded_service();
        let ids = vec![
            "phone".to_string(),
            "ghost".to_string(),
            "laptop-pro".to_string(),
        ];
        let summaries = service.get_summaries(&ids, None, None).unwrap();
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["phone", "laptop-pro"]);
    }

    #[tokio::test]
    async fn test_create_product_validation() {
        let (service, _) = seeded_service();
        let base = NewProduct {
            id: Some("tablet".to_string()),
            category_id: "computers".to_string(),
            slug: None,
            price: dec!(349),
            image_url: None,
            stock: 3,
            is_active: true,
            specifications: BTreeMap::new(),
            translations: vec![translation("", "EN", " Tablet Air ")],
        };

        let negative = NewProduct {
            price: dec!(-1),
            ..base.clone()
        };
        assert!(matches!(
            service.create_product(negative).await,
            Err(Error::Validation(_))
        ));

        let no_translations = NewProduct {
            translations: vec![],
            ..base.clone()
        };
        assert!(service.create_product(no_translations).await.is_err());

        let unknown_language = NewProduct {
            translations: vec![translation("", "xx", "Tablet")],
            ..base.clone()
        };
        assert!(service.create_product(unknown_language).await.is_err());

        let created = service.create_product(base.clone()).await.unwrap();
        assert_eq!(created.slug, "tablet-air");

        let duplicate = NewProduct {
            id: Some("tablet-2".to_string()),
            ..base
        };
        assert!(matches!(
            service.create_product(duplicate).await,
            Err(Error::ConstraintViolation(_))
        ));
    }
}
