//! Marketing content for the landing page
//!
//! Static data only. The page fetches it from `/api/site` and the assistant's
//! persona quotes from it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompanyInfo {
    pub name: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub working_hours: &'static str,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub average_income: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Feature {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub icon_name: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CarModel {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub price: &'static str,
    pub category: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Review {
    pub id: u32,
    pub name: &'static str,
    pub role: &'static str,
    pub avatar: &'static str,
    pub content: &'static str,
    /// Stars out of five
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Everything the page renders, in one payload
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SiteContent {
    pub company: CompanyInfo,
    pub features: &'static [Feature],
    pub fleet: &'static [CarModel],
    pub reviews: &'static [Review],
    pub faq: &'static [FaqItem],
}

const COMPANY: CompanyInfo = CompanyInfo {
    name: "Прайм Парк",
    phone: "+7 (999) 123-45-67",
    address: "г. Москва, ул. Складочная, д. 1, стр. 5",
    working_hours: "Ежедневно 9:00 - 21:00",
    hero_title: "Аренда авто для работы в такси без залога",
    hero_subtitle: "Новые автомобили с лицензией и брендированием. Ежедневные выплаты, низкая комиссия и поддержка 24/7.",
    average_income: "7 500 ₽ / смена",
};

const FEATURES: &[Feature] = &[
    Feature {
        id: 1,
        title: "Ежедневные выплаты",
        description: "Выводите заработанное каждый день на любую карту без задержек.",
        icon_name: "Wallet",
    },
    Feature {
        id: 2,
        title: "Низкая комиссия",
        description: "Комиссия парка всего 3% — одна из самых низких в городе.",
        icon_name: "Percent",
    },
    Feature {
        id: 3,
        title: "Поддержка 24/7",
        description: "Диспетчер и механики на связи круглосуточно, решим любой вопрос на линии.",
        icon_name: "Clock",
    },
    Feature {
        id: 4,
        title: "Свежий автопарк",
        description: "Автомобили не старше трёх лет, ТО и шиномонтаж за счёт парка.",
        icon_name: "Car",
    },
];

const FLEET: &[CarModel] = &[
    CarModel {
        id: "polo",
        name: "Volkswagen Polo",
        image: "https://picsum.photos/600/400?random=1",
        price: "от 1 900 ₽ / сутки",
        category: "Эконом",
        features: &["Кондиционер", "АКПП", "Брендирование"],
    },
    CarModel {
        id: "k5",
        name: "Kia K5",
        image: "https://picsum.photos/600/400?random=2",
        price: "от 2 900 ₽ / сутки",
        category: "Комфорт+",
        features: &["Климат-контроль", "Подогрев сидений", "Лицензия"],
    },
    CarModel {
        id: "camry",
        name: "Toyota Camry",
        image: "https://picsum.photos/600/400?random=3",
        price: "от 3 900 ₽ / сутки",
        category: "Бизнес",
        features: &["Кожаный салон", "Климат-контроль", "Тонировка"],
    },
];

const REVIEWS: &[Review] = &[
    Review {
        id: 1,
        name: "Алексей",
        role: "Водитель, 2 года в парке",
        avatar: "https://picsum.photos/100/100?random=11",
        content: "Машины в отличном состоянии, выплаты приходят каждый день. Рекомендую.",
        rating: 5,
    },
    Review {
        id: 2,
        name: "Руслан",
        role: "Водитель тарифа Комфорт+",
        avatar: "https://picsum.photos/100/100?random=12",
        content: "Подключили за один день, механики быстро решают вопросы с ТО.",
        rating: 5,
    },
    Review {
        id: 3,
        name: "Дмитрий",
        role: "Водитель, 6 месяцев в парке",
        avatar: "https://picsum.photos/100/100?random=13",
        content: "Удобный график и честная комиссия. Иногда приходится ждать свободную машину.",
        rating: 4,
    },
];

const FAQ: &[FaqItem] = &[
    FaqItem {
        question: "Какие документы нужны для подключения?",
        answer: "Паспорт, водительское удостоверение категории B со стажем от 3 лет и СНИЛС.",
    },
    FaqItem {
        question: "Нужен ли залог за автомобиль?",
        answer: "Нет, мы выдаём автомобили без залога при стаже вождения от 3 лет.",
    },
    FaqItem {
        question: "Как происходят выплаты?",
        answer: "Выплаты ежедневные, на любую банковскую карту, обычно в течение нескольких минут.",
    },
    FaqItem {
        question: "Кто оплачивает ремонт и обслуживание?",
        answer: "Плановое ТО, замена резины и страховка — за счёт парка.",
    },
];

pub fn company() -> &'static CompanyInfo {
    &COMPANY
}

pub fn fleet() -> &'static [CarModel] {
    FLEET
}

pub fn faq() -> &'static [FaqItem] {
    FAQ
}

pub fn site_content() -> SiteContent {
    SiteContent {
        company: COMPANY,
        features: FEATURES,
        fleet: FLEET,
        reviews: REVIEWS,
        faq: FAQ,
    }
}
