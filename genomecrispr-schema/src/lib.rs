// Mirrors `genomecrispr-backend/migrations`. Keep the two in sync.

diesel::table! {
    gene (id) {
        id -> Int4,
        symbol -> Text,
        ensg -> Text,
    }
}

diesel::table! {
    genescreen (gene_id, screen_id) {
        gene_id -> Int4,
        screen_id -> Int4,
    }
}

diesel::table! {
    phen (id) {
        id -> Int4,
        effect -> Int4,
        log2fc -> Float8,
        rc_initial -> Int4,
        rc_final -> Int4,
    }
}

diesel::table! {
    screen (id) {
        id -> Int4,
        pubmed -> Int4,
        screentype -> Text,
        condition -> Text,
        cas -> Text,
        cellline -> Text,
    }
}

diesel::table! {
    sg (id) {
        id -> Int4,
        chr -> Text,
        start -> Int4,
        end -> Int4,
        strand -> Text,
        sequence -> Text,
        gene_id -> Int4,
    }
}

diesel::table! {
    sgscreen (sg_id, screen_id) {
        sg_id -> Int4,
        screen_id -> Int4,
        phen_id -> Int4,
    }
}

diesel::joinable!(genescreen -> gene (gene_id));
diesel::joinable!(genescreen -> screen (screen_id));
diesel::joinable!(sg -> gene (gene_id));
diesel::joinable!(sgscreen -> phen (phen_id));
diesel::joinable!(sgscreen -> screen (screen_id));
diesel::joinable!(sgscreen -> sg (sg_id));

diesel::allow_tables_to_appear_in_same_query!(gene, genescreen, phen, screen, sg, sgscreen);
