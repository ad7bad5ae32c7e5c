//! Fixed texts for the chat assistant
//!
//! The persona instruction sent with every request, the welcome turn, and the
//! fallback replies shown when the gateway cannot produce a real answer.

use crate::catalog;
use std::fmt::Write;

/// Sampling temperature for every request
pub const TEMPERATURE: f32 = 0.7;

/// First turn of every transcript
pub const WELCOME_TEXT: &str = "Здравствуйте! Я помощник таксопарка \"Прайм Парк\". Подсказать условия аренды или помочь с регистрацией? 🚕";

/// Shown when no API credential is configured
pub const UNAVAILABLE_TEXT: &str =
    "Извините, сервис временно недоступен (API Key missing). Пожалуйста, позвоните нам.";

/// Shown when the service answers with nothing usable
pub const NOT_UNDERSTOOD_TEXT: &str = "Извините, я не понял вопрос.";

/// Shown on any transport or service error
pub const COMMUNICATION_ERROR_TEXT: &str = "Произошла ошибка связи. Пожалуйста, попробуйте позже.";

const BASE_PROMPT: &str = r"Ты — вежливый и дружелюбный онлайн-помощник таксопарка. Ты помогаешь водителям, которые хотят арендовать автомобиль для работы в такси или подключиться к таксопарку.

Правила:
- Отвечай только на русском языке, коротко и по делу (2-4 предложения).
- Говори только об аренде авто, условиях работы, выплатах, требованиях к водителям и подключении.
- Не выдумывай цены и условия, которых нет в справке ниже. Если не знаешь ответа, предложи позвонить менеджеру.
- В конце ответа, когда уместно, предлагай оставить заявку на сайте или позвонить.";

/// Build the persona instruction from the site's own content, so the
/// assistant quotes the same prices and FAQ answers the page shows.
pub fn system_instruction() -> String {
    let company = catalog::company();
    let mut prompt = String::from(BASE_PROMPT);

    let _ = write!(
        prompt,
        "\n\nСправка о компании:\n- Название: {}\n- Телефон: {}\n- Адрес офиса: {}\n- Режим работы: {}",
        company.name, company.phone, company.address, company.working_hours
    );

    prompt.push_str("\n\nАвтопарк:");
    for car in catalog::fleet() {
        let _ = write!(
            prompt,
            "\n- {} ({}): {}; {}",
            car.name,
            car.category,
            car.price,
            car.features.join(", ")
        );
    }

    prompt.push_str("\n\nЧастые вопросы:");
    for item in catalog::faq() {
        let _ = write!(prompt, "\n- {} {}", item.question, item.answer);
    }

    prompt
}
