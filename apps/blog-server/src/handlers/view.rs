//! Domain values to response payloads.

use inkwell_core::domain::{Category, MenuLink, Page, Post, SiteSetup, Tag, User};
use inkwell_core::{Detail, Listing, Paginated};
use inkwell_shared::dto::{
    AuthorResponse, ListingResponse, MenuLinkResponse, PageDetailResponse, PageResponse,
    PaginationMeta, PostDetailResponse, PostResponse, SiteSetupResponse, TaxonomyResponse,
};

pub fn listing(listing: Listing, site_setup: Option<SiteSetup>) -> ListingResponse {
    let posts = listing.posts.map(post);
    ListingResponse {
        page_title: listing.page_title,
        pagination: pagination(&posts),
        items: posts.items,
        search_value: listing.search_value,
        site_setup: site_setup.map(site),
    }
}

pub fn post_detail(detail: Detail<Post>, site_setup: Option<SiteSetup>) -> PostDetailResponse {
    PostDetailResponse {
        page_title: detail.page_title,
        post: post(detail.entity),
        site_setup: site_setup.map(site),
    }
}

pub fn page_detail(detail: Detail<Page>, site_setup: Option<SiteSetup>) -> PageDetailResponse {
    PageDetailResponse {
        page_title: detail.page_title,
        page: PageResponse {
            id: detail.entity.id,
            title: detail.entity.title,
            slug: detail.entity.slug,
            content: detail.entity.content,
        },
        site_setup: site_setup.map(site),
    }
}

fn pagination<T>(page: &Paginated<T>) -> PaginationMeta {
    PaginationMeta {
        number: page.number,
        num_pages: page.num_pages,
        per_page: page.per_page,
        total: page.total,
        has_previous: page.has_previous(),
        has_next: page.has_next(),
    }
}

fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        content: post.content,
        cover: post.cover,
        cover_in_post_content: post.cover_in_post_content,
        created_at: post.created_at,
        updated_at: post.updated_at,
        category: post.category.map(category),
        tags: post.tags.into_iter().map(tag).collect(),
        created_by: post.created_by.map(author),
        updated_by: post.updated_by.map(author),
    }
}

fn category(category: Category) -> TaxonomyResponse {
    TaxonomyResponse {
        id: category.id,
        name: category.name,
        slug: category.slug,
    }
}

fn tag(tag: Tag) -> TaxonomyResponse {
    TaxonomyResponse {
        id: tag.id,
        name: tag.name,
        slug: tag.slug,
    }
}

fn author(user: User) -> AuthorResponse {
    AuthorResponse {
        id: user.id,
        display_name: user.display_name(),
        username: user.username,
    }
}

fn site(setup: SiteSetup) -> SiteSetupResponse {
    SiteSetupResponse {
        title: setup.title,
        description: setup.description,
        show_header: setup.show_header,
        show_search: setup.show_search,
        show_menu: setup.show_menu,
        show_description: setup.show_description,
        show_pagination: setup.show_pagination,
        show_footer: setup.show_footer,
        favicon: setup.favicon,
        menu: setup.menu.into_iter().map(menu_link).collect(),
    }
}

fn menu_link(link: MenuLink) -> MenuLinkResponse {
    MenuLinkResponse {
        text: link.text,
        url_or_path: link.url_or_path,
        new_tab: link.new_tab,
    }
}
