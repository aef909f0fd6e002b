//! Interface translations.
//!
//! Labels are looked up by dotted key; a missing key renders as itself,
//! which makes a forgotten translation visible instead of fatal. The
//! chosen language persists in the store under `mymanager_lang` so it
//! survives restarts alongside the data it describes.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::storage::StorageBackend;

pub const LANG_KEY: &str = "mymanager_lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Lang::En),
            "fr" => Some(Lang::Fr),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Lang::En => Lang::Fr,
            Lang::Fr => Lang::En,
        }
    }
}

pub struct I18n {
    backend: Arc<dyn StorageBackend>,
    lang: Lang,
    map: HashMap<&'static str, &'static str>,
}

impl I18n {
    /// Restores the persisted language, falling back to `default` for a
    /// fresh store or an unrecognized code.
    pub fn load(backend: Arc<dyn StorageBackend>, default: Lang) -> Self {
        let lang = match backend.get(LANG_KEY) {
            Ok(Some(code)) => Lang::parse(code.trim()).unwrap_or(default),
            Ok(None) => default,
            Err(err) => {
                warn!(target: "i18n", "could not read language preference: {err}");
                default
            }
        };
        let mut i18n = I18n {
            backend,
            lang,
            map: HashMap::new(),
        };
        i18n.rebuild();
        i18n
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn set_language(&mut self, lang: Lang) {
        self.lang = lang;
        self.rebuild();
        if let Err(err) = self.backend.set(LANG_KEY, lang.code()) {
            warn!(target: "i18n", "could not persist language preference: {err}");
        }
    }

    pub fn toggle(&mut self) {
        self.set_language(self.lang.toggled());
    }

    /// Translation for `key`, or the key itself when untranslated.
    pub fn t(&self, key: &'static str) -> &'static str {
        self.map.get(key).copied().unwrap_or(key)
    }

    fn rebuild(&mut self) {
        self.map = translations(self.lang).iter().copied().collect();
    }
}

fn translations(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::Fr => FR,
    }
}

#[rustfmt::skip]
static EN: &[(&str, &str)] = &[
    ("nav.dashboard", "Dashboard"),
    ("nav.games", "Games"),
    ("nav.players", "Players"),
    ("nav.platforms", "Platforms"),
    ("nav.genres", "Genres"),
    ("nav.orders", "Orders"),
    ("nav.logout", "Logout"),

    ("login.username", "Username"),
    ("login.password", "Password"),
    ("login.submit", "Login"),
    ("login.error", "Invalid credentials"),

    ("common.add", "Add"),
    ("common.edit", "Edit"),
    ("common.delete", "Delete"),
    ("common.save", "Save"),
    ("common.cancel", "Cancel"),
    ("common.search", "Search"),
    ("common.confirm", "Confirm"),
    ("common.confirmDelete", "Are you sure you want to delete this item?"),
    ("common.noData", "No data available"),
    ("common.loading", "Loading..."),
    ("common.total", "Total"),
    ("common.details", "Details"),
    ("common.actions", "Actions"),
    ("common.exportCSV", "Export CSV"),
    ("common.select", "Select"),
    ("common.sort", "Sort"),
    ("common.page", "Page"),
    ("common.language", "Language"),
    ("common.quit", "Quit"),

    ("form.required", "This field is required"),
    ("form.number", "Enter a valid number"),
    ("form.date", "Enter a date as YYYY-MM-DD"),

    ("dashboard.title", "Dashboard"),
    ("dashboard.totalGames", "Total Games"),
    ("dashboard.totalPlayers", "Total Players"),
    ("dashboard.totalPlatforms", "Total Platforms"),
    ("dashboard.totalOrders", "Total Orders"),
    ("dashboard.totalRevenue", "Total Revenue"),
    ("dashboard.gamesPerGenre", "Games per Genre"),
    ("dashboard.topGames", "Top Games by Sales"),
    ("dashboard.ordersOverTime", "Orders Over Time"),

    ("games.title", "Games Management"),
    ("games.add", "Add Game"),
    ("games.name", "Name"),
    ("games.genre", "Genre"),
    ("games.platform", "Platform"),
    ("games.price", "Price"),
    ("games.releaseDate", "Release Date"),
    ("games.rating", "Rating"),
    ("games.description", "Description"),

    ("players.title", "Players Management"),
    ("players.add", "Add Player"),
    ("players.name", "Name"),
    ("players.email", "Email"),
    ("players.age", "Age"),
    ("players.country", "Country"),
    ("players.favoriteGenre", "Favorite Genre"),

    ("platforms.title", "Platforms Management"),
    ("platforms.add", "Add Platform"),
    ("platforms.name", "Name"),
    ("platforms.company", "Company"),
    ("platforms.releaseYear", "Release Year"),

    ("genres.title", "Genres Management"),
    ("genres.add", "Add Genre"),
    ("genres.name", "Name"),
    ("genres.description", "Description"),

    ("orders.title", "Orders Management"),
    ("orders.add", "Add Order"),
    ("orders.player", "Player"),
    ("orders.game", "Game"),
    ("orders.date", "Date"),
    ("orders.amount", "Amount"),
    ("orders.status", "Status"),
];

#[rustfmt::skip]
static FR: &[(&str, &str)] = &[
    ("nav.dashboard", "Tableau de bord"),
    ("nav.games", "Jeux"),
    ("nav.players", "Joueurs"),
    ("nav.platforms", "Plateformes"),
    ("nav.genres", "Genres"),
    ("nav.orders", "Commandes"),
    ("nav.logout", "Déconnexion"),

    ("login.username", "Nom d'utilisateur"),
    ("login.password", "Mot de passe"),
    ("login.submit", "Se connecter"),
    ("login.error", "Identifiants incorrects"),

    ("common.add", "Ajouter"),
    ("common.edit", "Modifier"),
    ("common.delete", "Supprimer"),
    ("common.save", "Enregistrer"),
    ("common.cancel", "Annuler"),
    ("common.search", "Rechercher"),
    ("common.confirm", "Confirmer"),
    ("common.confirmDelete", "Êtes-vous sûr de vouloir supprimer cet élément ?"),
    ("common.noData", "Aucune donnée disponible"),
    ("common.loading", "Chargement..."),
    ("common.total", "Total"),
    ("common.details", "Détails"),
    ("common.actions", "Actions"),
    ("common.exportCSV", "Exporter en CSV"),
    ("common.select", "Sélectionner"),
    ("common.sort", "Trier"),
    ("common.page", "Page"),
    ("common.language", "Langue"),
    ("common.quit", "Quitter"),

    ("form.required", "Ce champ est requis"),
    ("form.number", "Saisissez un nombre valide"),
    ("form.date", "Saisissez une date au format AAAA-MM-JJ"),

    ("dashboard.title", "Tableau de bord"),
    ("dashboard.totalGames", "Total Jeux"),
    ("dashboard.totalPlayers", "Total Joueurs"),
    ("dashboard.totalPlatforms", "Total Plateformes"),
    ("dashboard.totalOrders", "Total Commandes"),
    ("dashboard.totalRevenue", "Revenus Totaux"),
    ("dashboard.gamesPerGenre", "Jeux par Genre"),
    ("dashboard.topGames", "Top Jeux par Ventes"),
    ("dashboard.ordersOverTime", "Commandes dans le Temps"),

    ("games.title", "Gestion des Jeux"),
    ("games.add", "Ajouter un Jeu"),
    ("games.name", "Nom"),
    ("games.genre", "Genre"),
    ("games.platform", "Plateforme"),
    ("games.price", "Prix"),
    ("games.releaseDate", "Date de Sortie"),
    ("games.rating", "Note"),
    ("games.description", "Description"),

    ("players.title", "Gestion des Joueurs"),
    ("players.add", "Ajouter un Joueur"),
    ("players.name", "Nom"),
    ("players.email", "Email"),
    ("players.age", "Âge"),
    ("players.country", "Pays"),
    ("players.favoriteGenre", "Genre Préféré"),

    ("platforms.title", "Gestion des Plateformes"),
    ("platforms.add", "Ajouter une Plateforme"),
    ("platforms.name", "Nom"),
    ("platforms.company", "Entreprise"),
    ("platforms.releaseYear", "Année de Sortie"),

    ("genres.title", "Gestion des Genres"),
    ("genres.add", "Ajouter un Genre"),
    ("genres.name", "Nom"),
    ("genres.description", "Description"),

    ("orders.title", "Gestion des Commandes"),
    ("orders.add", "Ajouter une Commande"),
    ("orders.player", "Joueur"),
    ("orders.game", "Jeu"),
    ("orders.date", "Date"),
    ("orders.amount", "Montant"),
    ("orders.status", "Statut"),
];
