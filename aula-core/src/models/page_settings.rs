// Aula - A training and content platform backend built with Rust
// Copyright (C) 2026 Aula Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub cta_label: String,
    pub cta_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeaturedCourseSection {
    pub heading: String,
    pub training_slug: Option<String>,
    pub blurb: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandoutItem {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandoutSection {
    pub heading: String,
    pub items: Vec<StandoutItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleEntry {
    pub title: String,
    pub description: String,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    pub author: String,
    pub role: String,
    pub quote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactStats {
    pub students_trained: i64,
    pub completion_rate_pct: i32,
    pub years_running: i32,
    pub partner_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CtaSection {
    pub heading: String,
    pub button_label: String,
    pub button_url: String,
}

/// Free-form ordered section an admin can add to the page without a
/// code change. `template` names the frontend rendering to use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomSection {
    pub key: String,
    pub title: String,
    pub body: String,
    pub template: String,
    pub is_visible: bool,
    pub position: i32,
}

/// The training landing page configuration. Exactly one row exists;
/// it is seeded with these defaults during database initialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingPageSettings {
    pub id: Option<i64>,
    pub hero: HeroSection,
    pub featured_course: FeaturedCourseSection,
    pub standout: StandoutSection,
    pub modules: Vec<ModuleEntry>,
    pub testimonials: Vec<Testimonial>,
    pub impact: ImpactStats,
    pub cta: CtaSection,
    pub custom_sections: Vec<CustomSection>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for TrainingPageSettings {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            hero: HeroSection {
                title: "Learn a craft that pays".to_string(),
                subtitle: "Hands-on training programs with real instructors".to_string(),
                image_url: None,
                cta_label: "Enroll now".to_string(),
                cta_url: "/enroll".to_string(),
            },
            featured_course: FeaturedCourseSection {
                heading: "Featured program".to_string(),
                training_slug: None,
                blurb: "Our most popular training, updated every season.".to_string(),
            },
            standout: StandoutSection {
                heading: "Why train with us".to_string(),
                items: vec![
                    StandoutItem {
                        title: "Small groups".to_string(),
                        description: "Never more than twelve students per class.".to_string(),
                        icon: "users".to_string(),
                    },
                    StandoutItem {
                        title: "Practical first".to_string(),
                        description: "You work on real projects from day one.".to_string(),
                        icon: "tools".to_string(),
                    },
                    StandoutItem {
                        title: "Certificate".to_string(),
                        description: "A recognized certificate on completion.".to_string(),
                        icon: "award".to_string(),
                    },
                ],
            },
            modules: vec![
                ModuleEntry {
                    title: "Foundations".to_string(),
                    description: "The essentials, from zero.".to_string(),
                    position: 0,
                },
                ModuleEntry {
                    title: "Practice weeks".to_string(),
                    description: "Guided projects with feedback.".to_string(),
                    position: 1,
                },
            ],
            testimonials: vec![Testimonial {
                author: "Former student".to_string(),
                role: "Graduate, class of 2025".to_string(),
                quote: "The course changed how I work.".to_string(),
            }],
            impact: ImpactStats {
                students_trained: 500,
                completion_rate_pct: 92,
                years_running: 5,
                partner_count: 12,
            },
            cta: CtaSection {
                heading: "Ready to start?".to_string(),
                button_label: "Talk to us".to_string(),
                button_url: "/enroll".to_string(),
            },
            custom_sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update payload: sections left out keep their stored value.
/// Merging is whole-section, last write wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingPageSettingsUpdate {
    pub hero: Option<HeroSection>,
    pub featured_course: Option<FeaturedCourseSection>,
    pub standout: Option<StandoutSection>,
    pub modules: Option<Vec<ModuleEntry>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub impact: Option<ImpactStats>,
    pub cta: Option<CtaSection>,
    pub custom_sections: Option<Vec<CustomSection>>,
}

impl TrainingPageSettings {
    pub fn apply(&mut self, update: TrainingPageSettingsUpdate) {
        if let Some(hero) = update.hero {
            self.hero = hero;
        }
        if let Some(featured) = update.featured_course {
            self.featured_course = featured;
        }
        if let Some(standout) = update.standout {
            self.standout = standout;
        }
        if let Some(modules) = update.modules {
            self.modules = modules;
        }
        if let Some(testimonials) = update.testimonials {
            self.testimonials = testimonials;
        }
        if let Some(impact) = update.impact {
            self.impact = impact;
        }
        if let Some(cta) = update.cta {
            self.cta = cta;
        }
        if let Some(custom) = update.custom_sections {
            self.custom_sections = custom;
        }
        self.updated_at = Utc::now();
    }
}
