use axum::response::Html;

const LANDING_PAGE: &str = "<!doctype html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>TypeForge</title></head>\n<body>\n<h1>TypeForge</h1>\n<p>Тренажёр слепой печати: выберите текст и проверьте свою скорость.</p>\n<nav><a href=\"/texts\">Тексты</a> | <a href=\"/profile\">Профиль</a> | <a href=\"/login\">Вход</a> | <a href=\"/register\">Регистрация</a></nav>\n</body>\n</html>\n";

/// Static landing page.
pub async fn index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
