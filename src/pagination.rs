use serde::Serialize;

/// Items per listing page.
pub const PAGE_SIZE: usize = 10;

/// Which page links to render around the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationWindow {
    pub show: bool,
    pub pages: Vec<u32>,
}

/// One page of a listing plus its pagination context.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub show_pagination: bool,
    pub pages: Vec<u32>,
}

/// Computes the page numbers to display. A single page shows no pagination
/// at all; otherwise at most five page links are shown, clamped to the
/// start and end of the range.
pub fn window(current_page: u32, total_pages: u32) -> PaginationWindow {
    if total_pages <= 1 {
        return PaginationWindow {
            show: false,
            pages: Vec::new(),
        };
    }

    let pages = if total_pages <= 5 {
        (1..=total_pages).collect()
    } else if current_page <= 2 {
        (1..=5).collect()
    } else if current_page >= total_pages - 1 {
        (total_pages - 4..=total_pages).collect()
    } else {
        (current_page - 2..=current_page + 2).collect()
    };

    PaginationWindow { show: true, pages }
}

/// Cuts one page out of `items`. Returns `None` when the requested page is
/// out of range (page numbers start at 1; an empty listing still has one
/// page).
pub fn paginate<T>(items: Vec<T>, page: u32) -> Option<Paginated<T>> {
    let total_pages = (items.len().div_ceil(PAGE_SIZE)).max(1) as u32;
    if page == 0 || page > total_pages {
        return None;
    }

    let start = (page - 1) as usize * PAGE_SIZE;
    let page_items: Vec<T> = items.into_iter().skip(start).take(PAGE_SIZE).collect();
    let window = window(page, total_pages);

    Some(Paginated {
        items: page_items,
        current_page: page,
        total_pages,
        show_pagination: window.show,
        pages: window.pages,
    })
}
