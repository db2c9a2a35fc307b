use leptos::prelude::*;
use quill_types::Post;

use crate::components::post_card::PostCard;
use crate::pages::home::fetch_posts;

/// Number of posts the about page previews.
const LATEST_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub label: &'static str,
    pub href: Option<&'static str>,
    pub highlight: bool,
}

impl Contact {
    /// Web links open in a new tab; mail links and plain text do not.
    pub fn opens_new_tab(&self) -> bool {
        self.href
            .is_some_and(|h| h.starts_with("https://") || h.starts_with("http://"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Experience {
    pub title: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub stack: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Education {
    pub degree: &'static str,
    pub school: &'static str,
    pub period: &'static str,
    pub certificates: &'static [&'static str],
}

/// Everything the about page says about the author.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub portrait: &'static str,
    pub bio: &'static str,
    pub skills: &'static [&'static str],
    pub contacts: &'static [Contact],
    pub experience: &'static [Experience],
    pub projects: &'static [Project],
    pub education: &'static [Education],
}

pub const PROFILE: Profile = Profile {
    name: "Quill's author",
    role: "Security engineer and writer",
    portrait: "/favicon.svg",
    bio: "Computer engineer working on application security, with most of the day spent in Go, \
          C and Rust. Interested in network and web security, malware analysis and Linux \
          internals, and in explaining all of it plainly.",
    skills: &["C/C++", "Go", "Rust", "Python", "Linux", "Cybersecurity", "Networking"],
    contacts: &[
        Contact {
            label: "hello@quill.example",
            href: Some("mailto:hello@quill.example"),
            highlight: false,
        },
        Contact {
            label: "The blog",
            href: Some("/"),
            highlight: true,
        },
        Contact {
            label: "Istanbul, Turkey",
            href: None,
            highlight: false,
        },
        Contact {
            label: "GitHub",
            href: Some("https://github.com/"),
            highlight: false,
        },
        Contact {
            label: "LinkedIn",
            href: Some("https://www.linkedin.com/"),
            highlight: false,
        },
        Contact {
            label: "Twitter / X",
            href: Some("https://x.com/"),
            highlight: false,
        },
    ],
    experience: &[
        Experience {
            title: "Security Engineer (part time)",
            company: "Product security team",
            period: "Jan 2024 - Present",
            description: "Risk and vulnerability management, incident response and security \
                          policy work, plus secure development lifecycle reviews for products.",
        },
        Experience {
            title: "Freelance Web Developer",
            company: "Independent",
            period: "Oct 2024 - Nov 2024",
            description: "Built an interactive corporate site with video integration and a \
                          focus on accessible, user-friendly design.",
        },
    ],
    projects: &[
        Project {
            title: "Student hub",
            description: "Cross-platform desktop app for university students with a typed UI \
                          and a Go backend.",
            stack: &["TypeScript", "Go"],
        },
        Project {
            title: "Disc burner",
            description: "Windows tool for writing data securely to optical media.",
            stack: &["C++"],
        },
        Project {
            title: "Fileless malware detection",
            description: "Capstone research on spotting fileless malware with machine learning.",
            stack: &["Python"],
        },
        Project {
            title: "Quill",
            description: "This blog: a Go API and PostgreSQL behind a server-rendered Rust front end.",
            stack: &["Rust", "Go", "PostgreSQL"],
        },
    ],
    education: &[Education {
        degree: "Computer Engineering",
        school: "Istanbul Technical University",
        period: "2020 - 2025",
        certificates: &["Network security fundamentals", "Secure software development"],
    }],
};

#[component]
fn SkillBadge(skill: &'static str) -> impl IntoView {
    view! { <span class="skill-badge">{skill}</span> }
}

#[component]
fn ContactItem(contact: Contact) -> impl IntoView {
    let class = if contact.highlight { "contact-item highlight" } else { "contact-item" };
    match contact.href {
        Some(href) => {
            let (target, rel) = if contact.opens_new_tab() {
                (Some("_blank"), Some("noopener noreferrer"))
            } else {
                (None, None)
            };
            view! {
                <a class=class href=href target=target rel=rel>
                    {contact.label}
                </a>
            }
                .into_any()
        }
        None => view! { <span class=class>{contact.label}</span> }.into_any(),
    }
}

#[component]
fn ExperienceItem(item: Experience) -> impl IntoView {
    view! {
        <div class="cv-item">
            <h4>{item.title}</h4>
            <p class="cv-meta">{format!("{} \u{00b7} {}", item.company, item.period)}</p>
            <p>{item.description}</p>
        </div>
    }
}

#[component]
fn ProjectItem(project: Project) -> impl IntoView {
    view! {
        <div class="cv-item">
            <h4>{project.title}</h4>
            <p>{project.description}</p>
            <div class="skill-list">
                {project.stack.iter().map(|s| view! { <SkillBadge skill=*s /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn CvSection(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="cv-section">
            <h3>{title}</h3>
            {children()}
        </section>
    }
}

/// Newest public posts, loaded the same way the home page loads its first page.
#[component]
fn LatestPosts() -> impl IntoView {
    #[allow(unused_variables)]
    let (latest, setLatest) = signal(Option::<Result<Vec<Post>, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_posts(String::new(), 1)
                .await
                .map(|page| page.posts.into_iter().take(LATEST_COUNT).collect())
                .map_err(|e| e.to_string());
            setLatest.set(Some(result));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = fetch_posts;

    view! {
        <section class="latest-posts">
            <h2>"Latest from the blog"</h2>
            {move || match latest.get() {
                None => {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading posts..."
                        </div>
                    }
                        .into_any()
                }
                Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
                Some(Ok(posts)) if posts.is_empty() => {
                    view! { <p class="empty-state">"No posts yet."</p> }.into_any()
                }
                Some(Ok(posts)) => {
                    view! {
                        <div class="post-grid">
                            {posts.into_iter().map(|post| view! { <PostCard post=post /> }).collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
            <a class="btn btn-primary" href="/">
                "Read all posts"
            </a>
        </section>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    let profile = PROFILE;

    view! {
        <div class="about-page">
            <a class="back-link" href="/">
                "\u{2190} Back to the blog"
            </a>
            <section class="profile-card">
                <img class="profile-portrait" src=profile.portrait alt=profile.name />
                <div>
                    <h1>{profile.name}</h1>
                    <p class="subtitle">{profile.role}</p>
                    <p>{profile.bio}</p>
                    <div class="skill-list">
                        {profile.skills.iter().map(|s| view! { <SkillBadge skill=*s /> }).collect_view()}
                    </div>
                </div>
            </section>

            <h2>"Connect"</h2>
            <div class="contact-grid">
                {profile.contacts.iter().map(|c| view! { <ContactItem contact=*c /> }).collect_view()}
            </div>

            <h2>"Experience & skills"</h2>
            <div class="cv-grid">
                <CvSection title="Work experience">
                    {profile
                        .experience
                        .iter()
                        .map(|e| view! { <ExperienceItem item=*e /> })
                        .collect_view()}
                </CvSection>
                <CvSection title="Projects">
                    {profile
                        .projects
                        .iter()
                        .map(|p| view! { <ProjectItem project=*p /> })
                        .collect_view()}
                </CvSection>
                <CvSection title="Education & certificates">
                    {profile
                        .education
                        .iter()
                        .map(|e| {
                            view! {
                                <div class="cv-item">
                                    <h4>{e.degree}</h4>
                                    <p class="cv-meta">{format!("{} ({})", e.school, e.period)}</p>
                                    <ul>
                                        {e.certificates.iter().map(|c| view! { <li>{*c}</li> }).collect_view()}
                                    </ul>
                                </div>
                            }
                        })
                        .collect_view()}
                </CvSection>
            </div>

            <LatestPosts />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_web_links_open_a_new_tab() {
        let web = Contact {
            label: "GitHub",
            href: Some("https://github.com/"),
            highlight: false,
        };
        let mail = Contact {
            label: "mail",
            href: Some("mailto:hello@quill.example"),
            highlight: false,
        };
        let place = Contact {
            label: "Istanbul",
            href: None,
            highlight: false,
        };
        assert!(web.opens_new_tab());
        assert!(!mail.opens_new_tab());
        assert!(!place.opens_new_tab());
    }

    #[test]
    fn profile_is_filled_in() {
        assert!(!PROFILE.skills.is_empty());
        assert!(!PROFILE.experience.is_empty());
        assert!(!PROFILE.projects.is_empty());
        assert!(PROFILE.projects.iter().all(|p| !p.stack.is_empty()));
        assert_eq!(PROFILE.contacts.iter().filter(|c| c.highlight).count(), 1);
    }
}
