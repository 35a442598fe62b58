//! Shared Tailwind class constants to keep screens visually consistent.

pub struct Theme;

impl Theme {
    /// White card with border used by every page section.
    pub const CARD: &'static str = "bg-white dark:bg-gray-800 shadow-sm border border-gray-200 dark:border-gray-700 rounded-lg";

    /// Standard text input.
    pub const INPUT: &'static str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    /// Form label above an input.
    pub const LABEL: &'static str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

    /// Table header cell.
    pub const TH: &'static str = "px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";

    /// Table body cell.
    pub const TD: &'static str = "px-6 py-4 whitespace-nowrap text-sm text-gray-700 dark:text-gray-300";

    /// Page heading.
    pub const H1: &'static str = "text-2xl font-semibold text-gray-900 dark:text-white";

    /// Primary action button, for plain `<button>` elements.
    pub const BUTTON_PRIMARY: &'static str = "text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:outline-none focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 text-center dark:bg-blue-600 dark:hover:bg-blue-700 disabled:opacity-50";

    /// Secondary outline button.
    pub const BUTTON_SECONDARY: &'static str = "px-4 py-2 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 hover:text-blue-700 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700 disabled:opacity-50";

    /// Small inline action link inside tables.
    pub const LINK: &'static str = "text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300 font-medium";
}
