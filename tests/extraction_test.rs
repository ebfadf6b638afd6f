/// Extraction-engine scenarios over fixture HTML.
/// The engine is a pure function of (url, html), so none of this touches
/// the network.
use casa_scout::ExtractionEngine;
use url::Url;

const IDEALISTA_FIXTURE: &str = r#"<!DOCTYPE html>
<html lang="pt">
<head>
    <title>Apartamento T2 Lisboa — Arroios | idealista</title>
    <meta property="og:title" content="Apartamento T2 Lisboa">
</head>
<body>
    <nav><a href="/">idealista</a><a href="/comprar-casas/lisboa/">Lisboa</a></nav>
    <main>
        <h1 class="main-info__title">Apartamento T2 Lisboa</h1>
        <span class="main-info__title-minor">Arroios, Lisboa</span>
        <span class="info-data-price">250.000 €</span>
        <div class="info-features">
            <span>75 m²</span>
            <span>2 quartos</span>
            <span>1 casa de banho</span>
        </div>
        <p>Apartamento remodelado junto ao metro, com boa exposição solar.</p>
    </main>
    <footer>© idealista</footer>
</body>
</html>"#;

const GENERIC_FIXTURE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta property="og:title" content="Casa Rústica">
    <title>Casa Rústica</title>
</head>
<body>
    <article>
        <p>Imóvel com 120 m² de área coberta, em bom estado de conservação.</p>
        <p>Contacte o proprietário para visitas.</p>
    </article>
</body>
</html>"#;

#[test]
fn idealista_listing_extracts_the_full_record() {
    let url = Url::parse("https://www.idealista.pt/imovel/12345/").unwrap();
    let record = ExtractionEngine::extract(&url, IDEALISTA_FIXTURE);

    println!("extracted record: {:?}", record);

    assert_eq!(record.fonte.as_deref(), Some("Idealista"));
    assert!(record
        .titulo
        .as_deref()
        .unwrap()
        .contains("Apartamento T2 Lisboa"));
    assert_eq!(record.preco, Some(250_000));
    assert_eq!(record.tipologia.as_deref(), Some("T2"));
    assert_eq!(record.area_util, Some(75));
    assert_eq!(record.quartos, Some(2));
    assert_eq!(record.casas_banho, Some(1));
    assert_eq!(record.localizacao.as_deref(), Some("Arroios, Lisboa"));
    assert_eq!(record.tipo_negocio.as_deref(), Some("Venda"));
    assert_eq!(record.tipo_imovel.as_deref(), Some("Apartamento"));
}

#[test]
fn unknown_portal_falls_back_to_generic_signals() {
    let url = Url::parse("https://www.quintasdominho.com/anuncio/987").unwrap();
    let record = ExtractionEngine::extract(&url, GENERIC_FIXTURE);

    assert_eq!(record.fonte.as_deref(), Some("Quintasdominho"));
    assert_eq!(record.titulo.as_deref(), Some("Casa Rústica"));
    assert_eq!(record.area_util, Some(120));

    // No portal-specific signals on the page → those fields stay absent.
    assert_eq!(record.preco, None);
    assert_eq!(record.tipologia, None);
    assert_eq!(record.quartos, None);
    assert_eq!(record.casas_banho, None);
    assert_eq!(record.localizacao, None);
    assert_eq!(record.tipo_imovel, None);

    // Sale is the implicit default when nothing signals a rental.
    assert_eq!(record.tipo_negocio.as_deref(), Some("Venda"));
}

#[test]
fn rental_path_token_overrides_page_text() {
    let url = Url::parse("https://www.idealista.pt/arrendar/imovel/12345/").unwrap();
    let record = ExtractionEngine::extract(&url, IDEALISTA_FIXTURE);
    assert_eq!(record.tipo_negocio.as_deref(), Some("Arrendamento"));
}

#[test]
fn extraction_is_idempotent() {
    let url = Url::parse("https://www.idealista.pt/imovel/12345/").unwrap();
    let first = ExtractionEngine::extract(&url, IDEALISTA_FIXTURE);
    let second = ExtractionEngine::extract(&url, IDEALISTA_FIXTURE);
    assert_eq!(first, second);
}

#[test]
fn pages_without_signals_yield_partial_records_not_errors() {
    let url = Url::parse("https://www.era.pt/imoveis/anuncio-sem-nada").unwrap();
    let record = ExtractionEngine::extract(&url, "<html><body><p>brevemente…</p></body></html>");

    assert_eq!(record.fonte.as_deref(), Some("ERA"));
    assert_eq!(record.tipo_negocio.as_deref(), Some("Venda"));
    assert_eq!(record.titulo, None);
    assert_eq!(record.preco, None);
    assert_eq!(record.area_util, None);
}

#[test]
fn json_ld_block_feeds_known_portal_extraction() {
    let html = r#"<html><head>
        <script type="application/ld+json">
        {"@type":"RealEstateListing","name":"Moradia T3 em Braga","offers":{"price":"325.000 €"},
         "address":{"addressLocality":"Braga"}}
        </script>
        </head><body><p>3 quartos, 2 casas de banho, 142 m²</p></body></html>"#;
    let url = Url::parse("https://www.era.pt/imoveis/moradia-braga-55").unwrap();
    let record = ExtractionEngine::extract(&url, html);

    assert_eq!(record.titulo.as_deref(), Some("Moradia T3 em Braga"));
    assert_eq!(record.preco, Some(325_000));
    assert_eq!(record.localizacao.as_deref(), Some("Braga"));
    // The regex table still fills what the structured data lacked.
    assert_eq!(record.quartos, Some(3));
    assert_eq!(record.casas_banho, Some(2));
    assert_eq!(record.area_util, Some(142));
    assert_eq!(record.tipo_imovel.as_deref(), Some("Moradia"));
}
