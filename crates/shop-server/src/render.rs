//! HTML Rendering
//!
//! Tera templates are compiled into the binary and set up once at startup by
//! `Renderer::init`, together with the global stylesheet and logo every page
//! links to.

use tera::{Context, Tera};

use shop_core::ProductView;

use crate::assets::{LOGO_PATH, STYLESHEET_PATH};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("product.html", include_str!("../templates/product.html")),
    ("fallback.html", include_str!("../templates/fallback.html")),
    ("catalog.html", include_str!("../templates/catalog.html")),
    ("message.html", include_str!("../templates/message.html")),
];

/// Seconds between reloads of the loading page
const FALLBACK_REFRESH_SECS: u64 = 1;

/// Page renderer
pub struct Renderer {
    tera: Tera,
    site_name: String,
}

impl Renderer {
    /// Compile the templates and register the shared layout assets
    pub fn init(site_name: impl Into<String>) -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;

        let site_name = site_name.into();
        tracing::debug!(site_name = %site_name, templates = TEMPLATES.len(), "renderer initialized");

        Ok(Self { tera, site_name })
    }

    /// Product detail page
    pub fn product_page(&self, product: &ProductView) -> tera::Result<String> {
        let mut context = self.base_context();
        context.insert("product", product);
        self.tera.render("product.html", &context)
    }

    /// Loading view served while a product page is generated
    pub fn fallback_page(&self) -> tera::Result<String> {
        let mut context = self.base_context();
        context.insert("refresh_secs", &FALLBACK_REFRESH_SECS);
        self.tera.render("fallback.html", &context)
    }

    /// Catalog listing
    pub fn catalog_page(&self, products: &[ProductView]) -> tera::Result<String> {
        let mut context = self.base_context();
        context.insert("products", products);
        self.tera.render("catalog.html", &context)
    }

    pub fn not_found_page(&self) -> tera::Result<String> {
        self.message_page("Produto não encontrado", "O produto que você procura não está disponível.")
    }

    pub fn unavailable_page(&self, message: &str) -> tera::Result<String> {
        self.message_page("Indisponível", message)
    }

    pub fn success_page(&self) -> tera::Result<String> {
        self.message_page(
            "Compra efetuada!",
            "Obrigado pela compra! Você receberá a confirmação por e-mail.",
        )
    }

    fn message_page(&self, heading: &str, message: &str) -> tera::Result<String> {
        let mut context = self.base_context();
        context.insert("heading", heading);
        context.insert("message", message);
        self.tera.render("message.html", &context)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site_name", &self.site_name);
        context.insert("stylesheet", STYLESHEET_PATH);
        context.insert("logo", LOGO_PATH);
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::UpstreamProduct;

    fn renderer() -> Renderer {
        Renderer::init("Ignite Shop").unwrap()
    }

    fn product() -> ProductView {
        ProductView::from_upstream(
            UpstreamProduct::new("prod_ABC", "Camiseta Beyond the Limits")
                .with_description("Algodão orgânico")
                .with_image("https://files.example/camiseta.png")
                .with_price("price_XYZ", Some(19990)),
        )
        .unwrap()
    }

    #[test]
    fn test_product_page() {
        let html = renderer().product_page(&product()).unwrap();
        assert!(html.contains("<title>Camiseta Beyond the Limits | Ignite Shop</title>"));
        assert!(html.contains("R$ 199,90"));
        assert!(html.contains("Algodão orgânico"));
        // attribute values go through HTML escaping
        assert!(html.contains("files.example&#x2F;camiseta.png"));
        assert!(html.contains(r#"data-price-id="price_XYZ""#));
        assert!(html.contains("Comprar agora"));
        assert!(html.contains(STYLESHEET_PATH));
    }

    #[test]
    fn test_product_page_escapes_upstream_text() {
        let mut view = product();
        view.title = "<script>alert(1)</script>".into();
        let html = renderer().product_page(&view).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_product_without_image() {
        let mut view = product();
        view.image_url.clear();
        let html = renderer().product_page(&view).unwrap();
        assert!(!html.contains(r#"width="520""#));
    }

    #[test]
    fn test_fallback_page() {
        let html = renderer().fallback_page().unwrap();
        assert!(html.contains("Carregando..."));
        assert!(html.contains(r#"http-equiv="refresh""#));
    }

    #[test]
    fn test_catalog_page() {
        let html = renderer().catalog_page(&[product()]).unwrap();
        assert!(html.contains(r#"href="/product/prod_ABC""#));
        assert!(html.contains("R$ 199,90"));

        let empty = renderer().catalog_page(&[]).unwrap();
        assert!(empty.contains("Nenhum produto"));
    }

    #[test]
    fn test_message_pages() {
        assert!(renderer().not_found_page().unwrap().contains("Produto não encontrado"));
        assert!(renderer().success_page().unwrap().contains("Compra efetuada!"));
    }
}
