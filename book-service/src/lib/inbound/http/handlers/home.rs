use axum::response::Html;

const HOMEPAGE: &str = r#"<html>
    <head>
        <title>Books API</title>
    </head>
    <body style="font-family: Arial; text-align: center; margin-top: 50px;">
        <h1>Books API</h1>
        <p>Public API for querying scraped book data</p>
        <a href="/api/v1/public/health" style="font-size: 20px; color: blue;">Service health</a>
    </body>
</html>
"#;

pub async fn homepage() -> Html<&'static str> {
    Html(HOMEPAGE)
}
