use leptos::prelude::*;
use quill_types::Post;

pub fn published_on(post: &Post) -> String {
    post.created_at.format("%B %-d, %Y").to_string()
}

#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let href = format!("/post/{}", post.id);
    let cover = post.cover_image().map(str::to_string);
    let published = published_on(&post);
    let tags = post.tag_list();

    view! {
        <article class="post-card">
            {cover.map(|src| view! { <img class="post-cover" src=src alt="" /> })}
            <div class="post-card-body">
                {post.category.clone().map(|c| view! { <span class="post-category">{c}</span> })}
                <h2 class="post-title">
                    <a href=href.clone()>{post.title.clone()}</a>
                </h2>
                <p class="post-summary">{post.summary.clone()}</p>
                <div class="post-meta">
                    <span>{published}</span>
                    <span>{format!("{} min read", post.read_time)}</span>
                    <span>{format!("\u{2665} {}", post.like_count)}</span>
                </div>
                <ul class="post-tags">
                    {tags.into_iter().map(|t| view! { <li class="tag">{t}</li> }).collect_view()}
                </ul>
                <a class="read-more" href=href>
                    "Read more"
                </a>
            </div>
        </article>
    }
}
